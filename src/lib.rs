//! Obesity Triage — doctor-style adaptive interview for childhood-obesity
//! risk. A pretrained surrogate decision tree picks the next topic to ask
//! about; a pretrained ensemble classifier makes the final prediction.

pub mod config;
pub mod error;
pub mod interview;
pub mod model;
pub mod recommend;
pub mod surface;
