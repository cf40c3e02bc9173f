//! Collaborator interfaces: image acquisition, font acquisition, publishing.
//!
//! The pipeline core consumes and produces only in-memory values; every piece
//! of I/O sits behind one of the three traits here. The shipped
//! implementations in [`local`] are filesystem-backed — a photo directory, a
//! font file, an output directory — which is all a cron-driven deployment
//! needs. A remote stock-photo or social-network adapter would implement the
//! same traits; none ships here.
//!
//! An image search returning `Ok(None)` means "the query produced an empty
//! result set". That is not an error: the orchestrator resamples the query
//! (new subject, new page) a bounded number of times before giving up.

pub mod local;

use image::DynamicImage;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::content;
use crate::date::DateContext;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("provider error: {0}")]
    Provider(String),
}

/// Credit for a sourced asset, used in the caption.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribution {
    pub author: Option<String>,
    pub source_url: Option<String>,
}

/// A decoded background photo plus optional credit.
#[derive(Debug)]
pub struct SourcedImage {
    pub image: DynamicImage,
    pub attribution: Option<Attribution>,
}

/// One stock-photo query: a subject, the day's color, and a result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageQuery {
    pub subject: String,
    pub color: String,
    pub page: u32,
}

impl ImageQuery {
    /// Draw a fresh query for a run: random subject, the day's fixed color,
    /// random page. Called again with the same rng to resample after an
    /// empty result.
    pub fn sample(date: &DateContext, rng: &mut impl Rng) -> Self {
        Self {
            subject: content::random_subject(rng).to_string(),
            color: content::search_color(date.day_of_week).to_string(),
            page: rng.gen_range(1..=10),
        }
    }
}

/// Background-photo collaborator.
pub trait ImageSource {
    /// `Ok(None)` = empty result set for this query; the caller resamples.
    fn search(&mut self, query: &ImageQuery) -> Result<Option<SourcedImage>, SourceError>;
}

/// Font collaborator. `charset` is the exact set of characters that will be
/// rendered, letting a web-font backend minimize its payload.
pub trait FontSource {
    fn fetch(&mut self, family: &str, charset: &str) -> Result<Vec<u8>, SourceError>;
}

/// The final artifact handed back by the publishing collaborator.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PublishReceipt {
    pub media_reference: String,
    pub caption: String,
}

/// Social-posting collaborator: final PNG bytes plus caption in, platform
/// reference out.
pub trait Publisher {
    fn publish(&mut self, png: &[u8], caption: &str) -> Result<PublishReceipt, SourceError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use image::RgbaImage;

    /// Image source fed a script of results, popped front to back.
    pub struct MockImageSource {
        pub results: Vec<Option<SourcedImage>>,
        pub queries: Vec<ImageQuery>,
    }

    impl MockImageSource {
        pub fn new(results: Vec<Option<SourcedImage>>) -> Self {
            Self { results, queries: Vec::new() }
        }

        pub fn plain_image(w: u32, h: u32) -> SourcedImage {
            SourcedImage {
                image: DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                    w,
                    h,
                    image::Rgba([120, 140, 160, 255]),
                )),
                attribution: Some(Attribution {
                    author: Some("Somchai".to_string()),
                    source_url: Some("https://photos.example/p/1".to_string()),
                }),
            }
        }
    }

    impl ImageSource for MockImageSource {
        fn search(&mut self, query: &ImageQuery) -> Result<Option<SourcedImage>, SourceError> {
            self.queries.push(query.clone());
            if self.results.is_empty() {
                return Ok(None);
            }
            Ok(self.results.remove(0))
        }
    }

    /// Font source returning fixed bytes and recording the requested charset.
    #[derive(Default)]
    pub struct MockFontSource {
        pub bytes: Vec<u8>,
        pub requests: Vec<(String, String)>,
    }

    impl FontSource for MockFontSource {
        fn fetch(&mut self, family: &str, charset: &str) -> Result<Vec<u8>, SourceError> {
            self.requests.push((family.to_string(), charset.to_string()));
            Ok(self.bytes.clone())
        }
    }

    /// Publisher that records what it was handed.
    #[derive(Default)]
    pub struct MockPublisher {
        pub published: Vec<(Vec<u8>, String)>,
        pub fail: bool,
    }

    impl Publisher for MockPublisher {
        fn publish(&mut self, png: &[u8], caption: &str) -> Result<PublishReceipt, SourceError> {
            if self.fail {
                return Err(SourceError::Provider("rejected by platform".to_string()));
            }
            self.published.push((png.to_vec(), caption.to_string()));
            Ok(PublishReceipt {
                media_reference: format!("media-{}", self.published.len()),
                caption: caption.to_string(),
            })
        }
    }

    #[test]
    fn query_sampling_varies_but_color_is_fixed() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(2);
        let ctx = DateContext::for_day(crate::date::DayOfWeek::Friday);
        let queries: Vec<_> = (0..10).map(|_| ImageQuery::sample(&ctx, &mut rng)).collect();
        assert!(queries.iter().all(|q| q.color == "blue"));
        assert!(queries.iter().all(|q| (1..=10).contains(&q.page)));
        // resampling actually changes the query
        assert!(queries.windows(2).any(|w| w[0] != w[1]));
    }
}
