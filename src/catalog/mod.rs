pub mod normalize;
pub mod product;
pub mod select;

pub use product::Product;
