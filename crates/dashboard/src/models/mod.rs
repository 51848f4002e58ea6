//! Domain types for the dashboard.
//!
//! These are the validated, plain-data types the services accept and return.
//! Database row shapes live next to the repositories in [`crate::db`].

pub mod category;
pub mod product;
pub mod store;

pub use category::{
    Category, CategoryData, SubCategory, SubCategoryData, SubCategoryWithCategory,
};
pub use product::{
    NewProduct, NewVariant, Product, ProductData, ProductUpsert, ProductVariant, SlugKind,
    VariantColor, VariantColorData, VariantImage, VariantImageData, VariantSize, VariantSizeData,
};
pub use store::{Store, StoreData};
