//! Client modules for the external collaborators

pub mod recognizer;
pub mod sentiment;
pub mod storage;

pub use recognizer::{TesseractRecognizer, TextRecognizer};
pub use sentiment::{ComprehendDetector, SentimentDetector, SentimentReport, SentimentScore};
pub use storage::{NewObject, ObjectPage, ObjectStore, S3ObjectStore};
