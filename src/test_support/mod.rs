pub mod helpers;
pub mod ssr;
