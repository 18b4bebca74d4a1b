pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::{NewProduct, Product, ProductPatch};
pub use repositories::ProductRepository;
pub use value_objects::ProductId;
