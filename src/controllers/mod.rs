pub mod ai_controller;
pub mod checkout_controller;
pub mod home_controller;
pub mod products_controller;
