pub mod feed;
pub mod login;
pub mod signup;
pub mod single_post;
