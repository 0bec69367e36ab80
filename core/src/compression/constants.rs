/// Codec names accepted by the `compression` descriptor parameter.
pub mod codec_names {
    pub const NONE: &str = "none";
    pub const ZSTD: &str = "zstd";
    pub const DEFLATE: &str = "deflate";

    pub const ALL: &[&str] = &[NONE, ZSTD, DEFLATE];
}

/// Staging sizes for the deflate decoder (flate2 has no recommended sizes).
pub const DEFLATE_IN_SIZE: usize = 32 * 1024;
pub const DEFLATE_OUT_SIZE: usize = 128 * 1024;

/// Staging capacity sanity bound (32 MiB) for explicitly sized sessions.
pub const MAX_STAGING_SIZE: usize = 32 * 1024 * 1024;
