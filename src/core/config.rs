use std::env;
use std::path::PathBuf;

fn required<F>(lookup: &F, name: &str) -> Result<String, String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("{name}: environment variable not found"))
}

fn optional<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|v| !v.is_empty())
}

fn process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_url: String,
    pub api_key: String,
    pub expiration_time: Option<String>,
}

impl WeatherConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_url: required(&lookup, "OPENWEATHERMAP_API_URL")?,
            api_key: required(&lookup, "OPENWEATHERMAP_API_KEY")?,
            expiration_time: optional(&lookup, "EXPIRATION_TIME"),
        })
    }
}

/// Bucket holding the source images, shared by the image and OCR functions.
#[derive(Debug, Clone)]
pub struct BucketConfig {
    pub bucket: String,
    pub bucket_path: String,
    pub expiration_time: Option<String>,
}

impl BucketConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            bucket: required(&lookup, "IMAGE_BUCKET")?,
            bucket_path: required(&lookup, "IMAGE_BUCKET_PATH")?,
            expiration_time: optional(&lookup, "EXPIRATION_TIME"),
        })
    }

    /// Public virtual-hosted URL of the bucket.
    #[must_use]
    pub fn public_domain(&self) -> String {
        format!("https://{}.s3.amazonaws.com", self.bucket)
    }

    /// Key of a source image under the configured prefix.
    #[must_use]
    pub fn source_key(&self, image: &str) -> String {
        format!("{}/{}", self.bucket_path, image)
    }
}

#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub bucket: BucketConfig,
    pub tesseract_bin: String,
    pub scratch_dir: PathBuf,
}

impl OcrConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            bucket: BucketConfig::from_lookup(&lookup)?,
            tesseract_bin: optional(&lookup, "TESSERACT_BIN")
                .unwrap_or_else(|| "tesseract".to_string()),
            scratch_dir: optional(&lookup, "OCR_SCRATCH_DIR")
                .map_or_else(env::temp_dir, PathBuf::from),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SportsConfig {
    pub api_url: String,
    pub api_key: String,
    pub expiration_time: Option<String>,
}

impl SportsConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_url: required(&lookup, "SPORTRADAR_API_URL")?,
            api_key: required(&lookup, "SPORTRADAR_API_KEY")?,
            expiration_time: optional(&lookup, "EXPIRATION_TIME"),
        })
    }
}
