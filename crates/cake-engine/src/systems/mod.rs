pub mod blow;
pub mod mapper;
pub mod particles;
pub mod proximity;
