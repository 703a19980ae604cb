#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use tower::ServiceExt;
use trip_api::{app, AppState};
use trip_catalog::{PackageSearch, PricingConfig, PricingEngine};
use trip_core::repository::{
    CategoryRepository, CustomPackageRepository, OfferRepository, PackageRepository,
};
use trip_core::{
    CategorizedPackage, Category, CoreError, CoreResult, CustomPackage, CustomPackageRequest,
    DiscountType, Offer, OfferInput, Package, PackageInput, PackageWithOffers, SearchFilters,
};

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    packages: Vec<Package>,
    offers: Vec<Offer>,
    custom_packages: Vec<CustomPackage>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory stand-in for every repository.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn lock(&self) -> CoreResult<std::sync::MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| CoreError::InternalError("store poisoned".to_string()))
    }

    pub fn add_category(&self, name: &str) -> i64 {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        t.categories.push(Category {
            id,
            name: name.to_string(),
            description: None,
            image_url: None,
        });
        id
    }

    pub fn add_package(&self, package: Package) -> i64 {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        t.packages.push(Package { id, ..package });
        id
    }

    pub fn add_offer(&self, offer: Offer) -> i64 {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        t.offers.push(Offer { id, ..offer });
        id
    }

    pub fn offer_count(&self, package_id: i64) -> usize {
        let t = self.tables.lock().unwrap();
        t.offers.iter().filter(|o| o.package_id == package_id).count()
    }

    pub fn custom_package(&self, custom_id: i64) -> Option<CustomPackage> {
        let t = self.tables.lock().unwrap();
        t.custom_packages.iter().find(|c| c.custom_id == custom_id).cloned()
    }
}

fn package_from_input(id: i64, input: &PackageInput) -> Package {
    Package {
        id,
        name: input.name.clone(),
        image_url: input.image_url.clone(),
        start_location: input.start_location.clone(),
        trip_place: input.trip_place.clone(),
        price: input.price,
        duration: input.duration,
        hotel_type: input.hotel_type.clone(),
        food_included: input.food_included,
        tour_guide: input.tour_guide,
        transport_type: input.transport_type.clone(),
        start_date: input.start_date,
        end_date: input.end_date,
        description: input.description.clone(),
        category_id: input.category_id,
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn list_categories(&self) -> CoreResult<Vec<Category>> {
        Ok(self.lock()?.categories.clone())
    }
}

#[async_trait]
impl PackageRepository for MemoryStore {
    async fn list_packages(&self) -> CoreResult<Vec<Package>> {
        Ok(self.lock()?.packages.clone())
    }

    async fn list_by_category(&self, category_id: i64) -> CoreResult<Vec<CategorizedPackage>> {
        let t = self.lock()?;
        let Some(category) = t.categories.iter().find(|c| c.id == category_id) else {
            return Ok(Vec::new());
        };
        Ok(t.packages
            .iter()
            .filter(|p| p.category_id == Some(category_id))
            .map(|p| CategorizedPackage {
                package: p.clone(),
                category_name: category.name.clone(),
            })
            .collect())
    }

    async fn get_package(&self, id: i64) -> CoreResult<Option<Package>> {
        Ok(self.lock()?.packages.iter().find(|p| p.id == id).cloned())
    }

    async fn create_package(&self, input: &PackageInput) -> CoreResult<i64> {
        let mut t = self.lock()?;
        let id = t.next_id();
        t.packages.push(package_from_input(id, input));
        Ok(id)
    }

    async fn update_package(&self, id: i64, input: &PackageInput) -> CoreResult<bool> {
        let mut t = self.lock()?;
        match t.packages.iter_mut().find(|p| p.id == id) {
            Some(existing) => {
                *existing = package_from_input(id, input);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_package(&self, id: i64) -> CoreResult<bool> {
        let mut t = self.lock()?;
        let before = t.packages.len();
        t.packages.retain(|p| p.id != id);
        t.offers.retain(|o| o.package_id != id);
        Ok(t.packages.len() < before)
    }

    async fn search_candidates(
        &self,
        _filters: &SearchFilters,
        _limit: usize,
    ) -> CoreResult<Vec<PackageWithOffers>> {
        let t = self.lock()?;
        Ok(t.packages
            .iter()
            .map(|p| PackageWithOffers {
                package: p.clone(),
                offers: t.offers.iter().filter(|o| o.package_id == p.id).cloned().collect(),
            })
            .collect())
    }
}

#[async_trait]
impl OfferRepository for MemoryStore {
    async fn list_offers(&self, package_id: i64) -> CoreResult<Vec<Offer>> {
        Ok(self
            .lock()?
            .offers
            .iter()
            .filter(|o| o.package_id == package_id)
            .cloned()
            .collect())
    }

    async fn create_offer(&self, package_id: i64, input: &OfferInput) -> CoreResult<Offer> {
        let mut t = self.lock()?;
        let offer = Offer {
            id: t.next_id(),
            package_id,
            discount_type: input.discount_type.clone(),
            discount_percentage: input.discount_percentage,
            min_group_size: input.min_group_size,
            max_group_size: input.max_group_size,
            min_duration: input.min_duration,
            max_duration: input.max_duration,
        };
        t.offers.push(offer.clone());
        Ok(offer)
    }
}

#[async_trait]
impl CustomPackageRepository for MemoryStore {
    async fn create_custom_package(&self, request: &CustomPackageRequest) -> CoreResult<i64> {
        let mut t = self.lock()?;
        let custom_id = t.next_id();
        t.custom_packages.push(CustomPackage {
            custom_id,
            request: request.clone(),
        });
        Ok(custom_id)
    }

    async fn get_custom_package(&self, custom_id: i64) -> CoreResult<Option<CustomPackage>> {
        Ok(self
            .lock()?
            .custom_packages
            .iter()
            .find(|c| c.custom_id == custom_id)
            .cloned())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(PricingConfig::default(), 10)
    }

    pub fn with_config(pricing: PricingConfig, page_size: usize) -> Self {
        let store = Arc::new(MemoryStore::default());
        let state = AppState {
            category_repo: store.clone(),
            package_repo: store.clone(),
            offer_repo: store.clone(),
            custom_package_repo: store.clone(),
            pricing: Arc::new(PricingEngine::new(pricing)),
            search: Arc::new(PackageSearch::new(page_size)),
        };
        Self { router: app(state), store }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }
}

pub fn package(name: &str, price: f64, duration: i32, start: NaiveDate) -> Package {
    Package {
        id: 0,
        name: name.to_string(),
        image_url: None,
        start_location: "Dhaka".to_string(),
        trip_place: "Cox's Bazar".to_string(),
        price,
        duration,
        hotel_type: "3-star".to_string(),
        food_included: true,
        tour_guide: false,
        transport_type: "Bus".to_string(),
        start_date: start,
        end_date: start + chrono::Duration::days(i64::from(duration)),
        description: None,
        category_id: None,
    }
}

pub fn offer(package_id: i64, kind: DiscountType, percentage: f64, min: i32, max: Option<i32>) -> Offer {
    let group = kind == DiscountType::GroupSize;
    Offer {
        id: 0,
        package_id,
        discount_type: kind,
        discount_percentage: percentage,
        min_group_size: if group { Some(min) } else { None },
        max_group_size: if group { max } else { None },
        min_duration: if group { None } else { Some(min) },
        max_duration: if group { None } else { max },
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
