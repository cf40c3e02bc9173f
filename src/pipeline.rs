//! The run orchestrator: one invocation, one post.
//!
//! A run walks a fixed sequence with no back-edges and no state carried
//! across runs:
//!
//! ```text
//! select content → acquire photo → fetch font → choose layout
//!   → fit font size → composite → assemble caption → publish
//! ```
//!
//! The pipeline is parameterized over the three collaborator traits, so the
//! same orchestrator drives a photo directory + output directory in
//! production and in-memory mocks in tests. Any collaborator failure aborts
//! the run before anything reaches the publisher — there is never a partial
//! post. The one sanctioned retry is image acquisition: an empty search
//! result resamples the query (new subject, new page) up to a bounded number
//! of attempts.

use image::{DynamicImage, GenericImageView};
use log::{info, warn};
use rand::Rng;
use thiserror::Error;

use crate::compose::{self, ComposeError};
use crate::config::BotConfig;
use crate::content::{self, ContentBundle};
use crate::date::DateContext;
use crate::fitting::{self, FitError, SizeSearch};
use crate::layout::LayoutTemplate;
use crate::sources::{Attribution, FontSource, ImageQuery, ImageSource, PublishReceipt, Publisher, SourceError};
use crate::text::{FontError, FontRenderer, TextRenderer};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("collaborator failed: {0}")]
    Source(#[from] SourceError),
    #[error(transparent)]
    Font(#[from] FontError),
    #[error(transparent)]
    Fit(#[from] FitError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error("no image found after {attempts} search attempts")]
    NoImageFound { attempts: u32 },
    #[error("font {family:?} lacks glyphs for {chars:?}")]
    MissingGlyphs { family: String, chars: Vec<char> },
    #[error("text cannot fit a {width}x{height} canvas even at floor size {floor}")]
    TextDoesNotFit { width: u32, height: u32, floor: u32 },
}

/// Everything the orchestrator needs beyond its collaborators.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub canvas: (u32, u32),
    pub watermark: String,
    pub search: SizeSearch,
    pub max_image_attempts: u32,
}

impl From<&BotConfig> for PipelineOptions {
    fn from(config: &BotConfig) -> Self {
        Self {
            canvas: (config.canvas.width, config.canvas.height),
            watermark: config.watermark.clone(),
            search: config.size_search(),
            max_image_attempts: config.search.max_attempts,
        }
    }
}

pub struct Pipeline<I, F, P> {
    pub image_source: I,
    pub font_source: F,
    pub publisher: P,
    pub options: PipelineOptions,
}

impl<I: ImageSource, F: FontSource, P: Publisher> Pipeline<I, F, P> {
    pub fn new(image_source: I, font_source: F, publisher: P, options: PipelineOptions) -> Self {
        Self { image_source, font_source, publisher, options }
    }

    /// Execute one full run.
    pub fn run(
        &mut self,
        date: &DateContext,
        rng: &mut impl Rng,
    ) -> Result<PublishReceipt, PipelineError> {
        let bundle = content::select(date, rng);
        info!("content: {:?} / {:?}", bundle.greeting, bundle.blessing);

        let (photo, attribution) = self.acquire_image(date, rng)?;

        let family = content::random_font_family(rng);
        let charset = required_charset(&[&bundle.greeting, &bundle.blessing], &self.options.watermark);
        let font_bytes = self.font_source.fetch(family, &charset)?;
        let renderer = FontRenderer::new(font_bytes)?;

        self.compose_and_publish(&renderer, family, photo, attribution, bundle, rng)
    }

    /// Search for a background photo, resampling the query on empty result
    /// sets up to the attempt bound.
    pub fn acquire_image(
        &mut self,
        date: &DateContext,
        rng: &mut impl Rng,
    ) -> Result<(DynamicImage, Option<Attribution>), PipelineError> {
        let attempts = self.options.max_image_attempts;
        for attempt in 1..=attempts {
            let query = ImageQuery::sample(date, rng);
            match self.image_source.search(&query)? {
                Some(sourced) => {
                    info!(
                        "photo acquired ({}x{}) for query {:?}",
                        sourced.image.width(),
                        sourced.image.height(),
                        query
                    );
                    return Ok((sourced.image, sourced.attribution));
                }
                None => warn!("empty result for {:?} (attempt {attempt}/{attempts})", query),
            }
        }
        Err(PipelineError::NoImageFound { attempts })
    }

    /// The tail of a run, from a ready renderer onward. Split out so tests
    /// can inject a renderer without a real font file.
    pub fn compose_and_publish(
        &mut self,
        renderer: &dyn TextRenderer,
        font_family: &str,
        photo: DynamicImage,
        attribution: Option<Attribution>,
        bundle: ContentBundle,
        rng: &mut impl Rng,
    ) -> Result<PublishReceipt, PipelineError> {
        let card = compose_card(renderer, font_family, photo, &bundle, &self.options, rng)?;
        info!("layout {:?}, font size {}pt", card.template, card.size);

        let png = compose::encode_png(&card.image)?;
        let caption = assemble_caption(&bundle.hashtag, attribution.as_ref(), font_family);
        let receipt = self.publisher.publish(&png, &caption)?;
        info!("published as {}", receipt.media_reference);
        Ok(receipt)
    }
}

/// A finished card plus the layout decisions that produced it.
#[derive(Debug)]
pub struct ComposedCard {
    pub image: image::RgbaImage,
    pub template: LayoutTemplate,
    pub size: u32,
}

/// One card from ready ingredients: glyph coverage check, canvas prep,
/// layout choice, size fit, composite. Both the publishing run and the
/// one-shot `compose` CLI path go through here, so no composition path can
/// reach the drawing step with uncovered text or an unfit size.
pub fn compose_card(
    renderer: &dyn TextRenderer,
    font_family: &str,
    photo: DynamicImage,
    bundle: &ContentBundle,
    options: &PipelineOptions,
    rng: &mut impl Rng,
) -> Result<ComposedCard, PipelineError> {
    let mut missing = renderer.missing_glyphs(&bundle.greeting);
    missing.extend(renderer.missing_glyphs(&bundle.blessing));
    missing.extend(renderer.missing_glyphs(&options.watermark));
    missing.sort_unstable();
    missing.dedup();
    if !missing.is_empty() {
        return Err(PipelineError::MissingGlyphs {
            family: font_family.to_string(),
            chars: missing,
        });
    }

    let (width, height) = options.canvas;
    let base = compose::prepare_base(photo, options.canvas);

    let template = LayoutTemplate::choose(rng);
    let placements = template.resolve(&bundle.greeting, &bundle.blessing, width, height);

    let outcome = fitting::fit_size(renderer, &placements, options.canvas, options.search)?;
    if !outcome.fitted {
        return Err(PipelineError::TextDoesNotFit {
            width,
            height,
            floor: options.search.floor,
        });
    }

    let image = compose::compose(
        &base,
        &placements,
        bundle.accent_color,
        renderer,
        outcome.size,
        &options.watermark,
    );
    Ok(ComposedCard { image, template, size: outcome.size })
}

/// The exact set of characters the font must cover, deduplicated and sorted,
/// so a web-font collaborator can subset its payload.
pub fn required_charset(texts: &[&str], watermark: &str) -> String {
    let mut chars: Vec<char> = texts
        .iter()
        .flat_map(|t| t.chars())
        .chain(watermark.chars())
        .collect();
    chars.sort_unstable();
    chars.dedup();
    chars.into_iter().collect()
}

/// Caption: hashtag line first, then credit lines when available.
fn assemble_caption(hashtag: &str, attribution: Option<&Attribution>, font_family: &str) -> String {
    let mut lines = vec![hashtag.to_string()];
    if let Some(attribution) = attribution {
        match (&attribution.author, &attribution.source_url) {
            (Some(author), Some(url)) => lines.push(format!("Photo: {author} ({url})")),
            (Some(author), None) => lines.push(format!("Photo: {author}")),
            (None, Some(url)) => lines.push(format!("Photo: {url}")),
            (None, None) => {}
        }
    }
    if !font_family.is_empty() {
        lines.push(format!("Font: {font_family}"));
    }
    lines.join("\n")
}
