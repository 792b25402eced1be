use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const DEFAULT_MEDIA_FOLDER: &str = "real-estate-club";
pub const DEFAULT_CLOUDINARY_API_URL: &str = "https://api.cloudinary.com/v1_1";

/// Applied by the store on upload: fit inside 1200x800, automatic quality and format.
pub const UPLOAD_TRANSFORMATION: &str = "c_limit,h_800,w_1200/q_auto/f_auto";

pub const SUBMISSION_WINDOW_SECS: u64 = 60 * 60;
