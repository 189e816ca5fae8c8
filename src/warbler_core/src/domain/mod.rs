pub mod email;
pub mod full_name;
pub mod identifiers;
pub mod password;
pub mod profile;
pub mod profile_image;
pub mod registration;
pub mod username;
