pub mod extract_slides_use_case;
pub mod run_config;
