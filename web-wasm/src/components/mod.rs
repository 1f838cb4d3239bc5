pub mod galaxy_details;
pub mod layout;
pub mod redshift_calculator;
pub mod sky_map;
