//! Default values for configuration fields.

pub fn default_database_url() -> String {
    "sqlite://./data/media-thumbs.db".to_string()
}

pub fn default_max_connections() -> Option<u32> {
    Some(10)
}

pub fn default_cache_capacity() -> usize {
    2048
}

pub fn default_jpeg_quality() -> u8 {
    100
}
