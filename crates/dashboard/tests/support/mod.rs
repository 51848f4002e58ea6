//! In-memory repository mocks and payload builders for service-level tests.
//!
//! The mocks are cheaply cloneable handles over shared state so a test can
//! hand one clone to a service and keep another to inspect rows and count
//! writes afterwards.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use vendora_core::{
    Actor, ActorRole, CategoryId, Email, ProductId, StoreId, SubCategoryId, UniqueField, UserId,
    VariantId,
};
use vendora_dashboard::db::{
    CategoriesRepo, ProductsRepo, RepositoryError, StoresRepo, SubCategoriesRepo,
};
use vendora_dashboard::models::{
    Category, CategoryData, NewProduct, NewVariant, Product, ProductData, ProductVariant, SlugKind,
    Store, StoreData, SubCategory, SubCategoryData, SubCategoryWithCategory, VariantColorData,
    VariantImageData, VariantSizeData,
};

// =============================================================================
// Actors
// =============================================================================

pub fn admin() -> Actor {
    Actor::new(UserId::generate(), ActorRole::Admin)
}

pub fn seller() -> Actor {
    Actor::new(UserId::generate(), ActorRole::Seller)
}

// =============================================================================
// Payload builders
// =============================================================================

pub fn category_data(name: &str, url: &str) -> CategoryData {
    CategoryData {
        id: CategoryId::generate(),
        name: name.to_owned(),
        url: url.to_owned(),
        image: format!("https://cdn.example.com/categories/{url}.png"),
    }
}

pub fn sub_category_data(name: &str, url: &str, category_id: CategoryId) -> SubCategoryData {
    SubCategoryData {
        id: SubCategoryId::generate(),
        name: name.to_owned(),
        url: url.to_owned(),
        category_id,
    }
}

pub fn store_data(name: &str, url: &str, email: &str, phone: &str) -> StoreData {
    StoreData {
        id: StoreId::generate(),
        name: name.to_owned(),
        url: url.to_owned(),
        email: Email::parse(email).unwrap(),
        phone: phone.to_owned(),
    }
}

pub fn product_data(
    name: &str,
    variant_name: &str,
    category_id: CategoryId,
    sub_category_id: SubCategoryId,
) -> ProductData {
    ProductData {
        product_id: ProductId::generate(),
        variant_id: VariantId::generate(),
        name: name.to_owned(),
        description: format!("{name} description"),
        brand: "Vendora".to_owned(),
        category_id,
        sub_category_id,
        variant_name: variant_name.to_owned(),
        variant_description: format!("{variant_name} colorway"),
        is_sale: false,
        sku: "SKU-001".to_owned(),
        keywords: vec!["shoes".to_owned(), "running".to_owned()],
        images: vec![VariantImageData {
            url: "https://cdn.example.com/img/main.png".to_owned(),
        }],
        colors: vec![VariantColorData {
            name: variant_name.to_owned(),
        }],
        sizes: vec![VariantSizeData {
            size: "42".to_owned(),
            quantity: 10,
            price: Decimal::new(1999, 2),
            discount: Decimal::ZERO,
        }],
    }
}

pub fn store_record(name: &str, url: &str, email: &str, phone: &str, owner: UserId) -> Store {
    let now = Utc::now();
    Store {
        id: StoreId::generate(),
        name: name.to_owned(),
        url: url.to_owned(),
        email: Email::parse(email).unwrap(),
        phone: phone.to_owned(),
        owner_id: owner,
        created_at: now,
        updated_at: now,
    }
}

// =============================================================================
// Category mock
// =============================================================================

#[derive(Clone, Default)]
pub struct MockCategoriesRepo {
    inner: Arc<CategoriesInner>,
}

#[derive(Default)]
struct CategoriesInner {
    rows: Mutex<Vec<Category>>,
    writes: AtomicUsize,
}

impl MockCategoriesRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    pub fn row_count(&self) -> usize {
        self.inner.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl CategoriesRepo for MockCategoriesRepo {
    async fn find_conflict(
        &self,
        name: &str,
        url: &str,
        exclude: CategoryId,
    ) -> Result<Option<UniqueField>, RepositoryError> {
        let rows = self.inner.rows.lock().unwrap();
        let hit = rows
            .iter()
            .find(|row| row.id != exclude && (row.name == name || row.url == url));
        Ok(hit.map(|row| {
            if row.name == name {
                UniqueField::Name
            } else {
                UniqueField::Url
            }
        }))
    }

    async fn upsert(&self, data: &CategoryData) -> Result<Category, RepositoryError> {
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.inner.rows.lock().unwrap();
        let now = Utc::now();

        if let Some(existing) = rows.iter_mut().find(|row| row.id == data.id) {
            existing.name = data.name.clone();
            existing.url = data.url.clone();
            existing.image = data.image.clone();
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let category = Category {
            id: data.id,
            name: data.name.clone(),
            url: data.url.clone(),
            image: data.image.clone(),
            created_at: now,
            updated_at: now,
        };
        rows.push(category.clone());
        Ok(category)
    }

    async fn list_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let mut rows = self.inner.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(rows)
    }

    async fn get(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let rows = self.inner.rows.lock().unwrap();
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn delete(&self, id: CategoryId) -> Result<Category, RepositoryError> {
        let mut rows = self.inner.rows.lock().unwrap();
        let pos = rows
            .iter()
            .position(|row| row.id == id)
            .ok_or(RepositoryError::NotFound)?;
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(rows.remove(pos))
    }
}

// =============================================================================
// Subcategory mock
// =============================================================================

#[derive(Clone, Default)]
pub struct MockSubCategoriesRepo {
    inner: Arc<SubCategoriesInner>,
}

#[derive(Default)]
struct SubCategoriesInner {
    rows: Mutex<Vec<SubCategory>>,
    categories: Mutex<Vec<Category>>,
    writes: AtomicUsize,
}

impl MockSubCategoriesRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    /// Seed a parent category for the joined listing.
    pub fn seed_category(&self, category: Category) {
        self.inner.categories.lock().unwrap().push(category);
    }
}

#[async_trait]
impl SubCategoriesRepo for MockSubCategoriesRepo {
    async fn find_conflict(
        &self,
        name: &str,
        url: &str,
        exclude: SubCategoryId,
    ) -> Result<Option<UniqueField>, RepositoryError> {
        let rows = self.inner.rows.lock().unwrap();
        let hit = rows
            .iter()
            .find(|row| row.id != exclude && (row.name == name || row.url == url));
        Ok(hit.map(|row| {
            if row.name == name {
                UniqueField::Name
            } else {
                UniqueField::Url
            }
        }))
    }

    async fn upsert(&self, data: &SubCategoryData) -> Result<SubCategory, RepositoryError> {
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.inner.rows.lock().unwrap();
        let now = Utc::now();

        if let Some(existing) = rows.iter_mut().find(|row| row.id == data.id) {
            existing.name = data.name.clone();
            existing.url = data.url.clone();
            existing.category_id = data.category_id;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let sub_category = SubCategory {
            id: data.id,
            name: data.name.clone(),
            url: data.url.clone(),
            category_id: data.category_id,
            created_at: now,
            updated_at: now,
        };
        rows.push(sub_category.clone());
        Ok(sub_category)
    }

    async fn list_all(&self) -> Result<Vec<SubCategoryWithCategory>, RepositoryError> {
        let categories = self.inner.categories.lock().unwrap();
        let mut rows = self.inner.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        Ok(rows
            .into_iter()
            .map(|sub_category| {
                let category = categories
                    .iter()
                    .find(|c| c.id == sub_category.category_id)
                    .cloned()
                    .unwrap();
                SubCategoryWithCategory {
                    sub_category,
                    category,
                }
            })
            .collect())
    }

    async fn list_for_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<SubCategory>, RepositoryError> {
        let mut rows: Vec<SubCategory> = self
            .inner
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.category_id == category_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(rows)
    }

    async fn get(&self, id: SubCategoryId) -> Result<Option<SubCategory>, RepositoryError> {
        let rows = self.inner.rows.lock().unwrap();
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn delete(&self, id: SubCategoryId) -> Result<SubCategory, RepositoryError> {
        let mut rows = self.inner.rows.lock().unwrap();
        let pos = rows
            .iter()
            .position(|row| row.id == id)
            .ok_or(RepositoryError::NotFound)?;
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(rows.remove(pos))
    }
}

// =============================================================================
// Store mock
// =============================================================================

#[derive(Clone, Default)]
pub struct MockStoresRepo {
    inner: Arc<StoresInner>,
}

#[derive(Default)]
struct StoresInner {
    rows: Mutex<Vec<Store>>,
    writes: AtomicUsize,
}

impl MockStoresRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    /// Seed a store directly, bypassing the service guards.
    pub fn seed(&self, store: Store) {
        self.inner.rows.lock().unwrap().push(store);
    }
}

#[async_trait]
impl StoresRepo for MockStoresRepo {
    async fn find_conflict(
        &self,
        name: &str,
        url: &str,
        email: &Email,
        phone: &str,
        exclude: StoreId,
    ) -> Result<Option<UniqueField>, RepositoryError> {
        let rows = self.inner.rows.lock().unwrap();
        let hit = rows.iter().find(|row| {
            row.id != exclude
                && (row.name == name
                    || row.url == url
                    || row.email.as_str() == email.as_str()
                    || row.phone == phone)
        });
        Ok(hit.and_then(|row| {
            if row.name == name {
                Some(UniqueField::Name)
            } else if row.url == url {
                Some(UniqueField::Url)
            } else if row.email.as_str() == email.as_str() {
                Some(UniqueField::Email)
            } else if row.phone == phone {
                Some(UniqueField::Phone)
            } else {
                None
            }
        }))
    }

    async fn upsert(&self, data: &StoreData, owner: UserId) -> Result<Store, RepositoryError> {
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.inner.rows.lock().unwrap();
        let now = Utc::now();

        if let Some(existing) = rows.iter_mut().find(|row| row.id == data.id) {
            // Ownership is fixed at creation: owner is ignored on update.
            existing.name = data.name.clone();
            existing.url = data.url.clone();
            existing.email = data.email.clone();
            existing.phone = data.phone.clone();
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let store = Store {
            id: data.id,
            name: data.name.clone(),
            url: data.url.clone(),
            email: data.email.clone(),
            phone: data.phone.clone(),
            owner_id: owner,
            created_at: now,
            updated_at: now,
        };
        rows.push(store.clone());
        Ok(store)
    }

    async fn get_by_url(&self, url: &str) -> Result<Option<Store>, RepositoryError> {
        let rows = self.inner.rows.lock().unwrap();
        Ok(rows.iter().find(|row| row.url == url).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Store>, RepositoryError> {
        let mut rows = self.inner.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(rows)
    }

    async fn get(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let rows = self.inner.rows.lock().unwrap();
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn delete(&self, id: StoreId) -> Result<Store, RepositoryError> {
        let mut rows = self.inner.rows.lock().unwrap();
        let pos = rows
            .iter()
            .position(|row| row.id == id)
            .ok_or(RepositoryError::NotFound)?;
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(rows.remove(pos))
    }
}

// =============================================================================
// Product mock
// =============================================================================

#[derive(Clone, Default)]
pub struct MockProductsRepo {
    inner: Arc<ProductsInner>,
}

#[derive(Default)]
struct ProductsInner {
    rows: Mutex<Vec<Product>>,
    writes: AtomicUsize,
}

impl MockProductsRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    pub fn product_count(&self) -> usize {
        self.inner.rows.lock().unwrap().len()
    }
}

fn variant_from_new(product_id: ProductId, new: &NewVariant) -> ProductVariant {
    let now = Utc::now();
    ProductVariant {
        id: new.id,
        product_id,
        variant_name: new.variant_name.clone(),
        variant_description: new.variant_description.clone(),
        slug: new.slug.clone(),
        is_sale: new.is_sale,
        sku: new.sku.clone(),
        keywords: new.keywords.clone(),
        images: new.images.clone(),
        colors: new.colors.clone(),
        sizes: new.sizes.clone(),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl ProductsRepo for MockProductsRepo {
    async fn exists(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let rows = self.inner.rows.lock().unwrap();
        Ok(rows.iter().any(|row| row.id == id))
    }

    async fn slug_exists(&self, kind: SlugKind, candidate: &str) -> Result<bool, RepositoryError> {
        let rows = self.inner.rows.lock().unwrap();
        let taken = match kind {
            SlugKind::Product => rows.iter().any(|row| row.slug.as_str() == candidate),
            SlugKind::Variant => rows
                .iter()
                .flat_map(|row| row.variants.iter())
                .any(|variant| variant.slug.as_str() == candidate),
        };
        Ok(taken)
    }

    async fn create_with_variant(
        &self,
        product: &NewProduct,
        variant: &NewVariant,
    ) -> Result<Product, RepositoryError> {
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.inner.rows.lock().unwrap();
        let now = Utc::now();

        let created = Product {
            id: product.id,
            name: product.name.clone(),
            slug: product.slug.clone(),
            description: product.description.clone(),
            brand: product.brand.clone(),
            store_id: product.store_id,
            category_id: product.category_id,
            sub_category_id: product.sub_category_id,
            variants: vec![variant_from_new(product.id, variant)],
            created_at: now,
            updated_at: now,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn add_variant(
        &self,
        product_id: ProductId,
        variant: &NewVariant,
    ) -> Result<ProductVariant, RepositoryError> {
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.inner.rows.lock().unwrap();
        let product = rows
            .iter_mut()
            .find(|row| row.id == product_id)
            .ok_or_else(|| RepositoryError::ForeignKey("no such product".to_owned()))?;

        let created = variant_from_new(product_id, variant);
        product.variants.push(created.clone());
        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut rows = self.inner.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        for row in &mut rows {
            row.variants.clear();
        }
        Ok(rows)
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let rows = self.inner.rows.lock().unwrap();
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn delete(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let mut rows = self.inner.rows.lock().unwrap();
        let pos = rows
            .iter()
            .position(|row| row.id == id)
            .ok_or(RepositoryError::NotFound)?;
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(rows.remove(pos))
    }
}
