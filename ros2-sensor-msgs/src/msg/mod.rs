mod image;

// Make these message types public
pub use image::Image;
