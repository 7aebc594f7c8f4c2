pub mod bcra;
pub mod caching;
pub mod datos_gob;
pub mod dolar_api;
pub mod util;
