mod migrations;
mod postgres;
mod rows;

pub use migrations::migrations;
pub use postgres::PostgresProductRepository;
