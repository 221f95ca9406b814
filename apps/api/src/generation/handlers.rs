//! Axum route handlers for the content generation API.
//!
//! Every handler follows the same flow: validate → build personalization
//! context → build prompt → single LLM call (poetry fans out to two) →
//! extract fields or JSON → respond. Missing delimiter fields degrade to
//! defaults; only unparseable JSON and upstream failures surface as errors.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::extraction::clean::clean_json_value;
use crate::extraction::json::{extract_json, ExtractError};
use crate::extraction::{extract_fields, FieldSpec};
use crate::generation::prompts::{self, ChatTurn, PoemStyle, StoryKind};
use crate::generation::verse::{fetch_verse, lookup_verse, ScriptureSource, VerseResponse};
use crate::personalization::{build_personalization_context, AgeRange, ContentMode, ReaderProfile};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct InterpretationRequest {
    pub verse_reference: String,
    pub verse_text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(flatten)]
    pub profile: ReaderProfile,
}

#[derive(Debug, Serialize)]
pub struct InterpretationResponse {
    pub interpretation: String,
    pub hero_image_prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct PoemRequest {
    pub verse_reference: String,
    pub verse_text: String,
    #[serde(default)]
    pub poem_type: PoemStyle,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(flatten)]
    pub profile: ReaderProfile,
}

#[derive(Debug, Serialize)]
pub struct Poem {
    pub title: String,
    #[serde(rename = "type")]
    pub poem_type: String,
    pub text: String,
    pub image_prompt: String,
}

#[derive(Debug, Serialize)]
pub struct PoemResponse {
    pub poem: Poem,
}

#[derive(Debug, Deserialize)]
pub struct StoryRequest {
    pub verse_reference: String,
    pub verse_text: String,
    #[serde(default)]
    pub story_type: StoryKind,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(flatten)]
    pub profile: ReaderProfile,
}

#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub title: String,
    pub text: String,
    pub image_prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct StoriesRequest {
    pub verse_reference: String,
    pub verse_text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(flatten)]
    pub profile: ReaderProfile,
}

#[derive(Debug, Serialize)]
pub struct StoryCard {
    pub title: String,
    pub text: String,
    pub image_prompt: String,
}

#[derive(Debug, Serialize)]
pub struct StoriesResponse {
    pub stories: Vec<StoryCard>,
}

#[derive(Debug, Deserialize)]
pub struct PoetryRequest {
    pub verse_reference: String,
    pub verse_text: String,
    #[serde(flatten)]
    pub profile: ReaderProfile,
}

#[derive(Debug, Serialize)]
pub struct PoetryResponse {
    pub poetry: Vec<Poem>,
}

#[derive(Debug, Deserialize)]
pub struct ContextRequest {
    pub verse_reference: String,
    pub verse_text: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(flatten)]
    pub profile: ReaderProfile,
}

/// Background fields the context endpoint asks the model to fill.
/// Individually defaulted: a missing field degrades to empty rather than
/// failing the whole response.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VerseContext {
    #[serde(default)]
    pub who_is_speaking: String,
    #[serde(default)]
    pub original_listeners: String,
    #[serde(default)]
    pub why_the_conversation: String,
    #[serde(default)]
    pub historical_backdrop: String,
    #[serde(default)]
    pub immediate_impact: String,
    #[serde(default)]
    pub long_term_impact: String,
    #[serde(default)]
    pub setting: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContextResponse {
    #[serde(default)]
    pub context: VerseContext,
    #[serde(default)]
    pub context_image_prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageryRequest {
    pub verse_reference: String,
    pub verse_text: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(flatten)]
    pub profile: ReaderProfile,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageryCard {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub image_prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageryResponse {
    #[serde(default)]
    pub imagery: Vec<ImageryCard>,
}

#[derive(Debug, Deserialize)]
pub struct VerseRequest {
    #[serde(default)]
    pub source: Option<ScriptureSource>,
    #[serde(default)]
    pub verse_query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub verse_reference: String,
    pub verse_text: String,
    #[serde(default)]
    pub history: Option<Vec<ChatTurn>>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(flatten)]
    pub profile: ReaderProfile,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate/interpretation
///
/// Personalized commentary on one verse, plus a hero image prompt.
pub async fn handle_interpretation(
    State(state): State<AppState>,
    Json(request): Json<InterpretationRequest>,
) -> Result<Json<InterpretationResponse>, AppError> {
    validate_verse(&request.verse_reference, &request.verse_text)?;

    let mode = request.profile.content_mode;
    let language = request.language.as_deref().unwrap_or("en");
    let personalization = build_personalization_context(&request.profile);
    let system = prompts::interpretation_system(mode, language, &personalization);
    let prompt = prompts::interpretation_prompt(
        &request.verse_reference,
        &request.verse_text,
        request.source.as_deref(),
        mode,
        language,
    );
    let max_tokens = match mode {
        ContentMode::Academic => 8000,
        ContentMode::Casual => 6000,
    };

    let text = state.llm.call(&prompt, &system, max_tokens).await?;

    let fields = extract_fields(
        &text,
        &[
            FieldSpec::new("INTERPRETATION", "Unable to generate interpretation."),
            FieldSpec::new(
                "IMAGE_PROMPT",
                "A serene scene with Islamic geometric patterns and soft light",
            ),
        ],
    );

    Ok(Json(InterpretationResponse {
        interpretation: fields["INTERPRETATION"].clone(),
        hero_image_prompt: fields["IMAGE_PROMPT"].clone(),
    }))
}

/// POST /api/v1/generate/poem
///
/// One poem (nasheed-style or free verse) inspired by the verse.
pub async fn handle_poem(
    State(state): State<AppState>,
    Json(request): Json<PoemRequest>,
) -> Result<Json<PoemResponse>, AppError> {
    validate_verse(&request.verse_reference, &request.verse_text)?;

    let mode = request.profile.content_mode;
    let personalization = build_personalization_context(&request.profile);
    let system = prompts::poem_system(mode, &personalization);
    let prompt = prompts::poem_prompt(
        &request.verse_reference,
        &request.verse_text,
        request.source.as_deref(),
        mode,
        request.poem_type,
    );

    let text = state.llm.call(&prompt, &system, 2500).await?;
    let poem = parse_poem(&text, request.poem_type);

    Ok(Json(PoemResponse { poem }))
}

/// POST /api/v1/generate/story
///
/// One full story (contemporary or historical) bringing the verse to life.
pub async fn handle_story(
    State(state): State<AppState>,
    Json(request): Json<StoryRequest>,
) -> Result<Json<StoryResponse>, AppError> {
    validate_verse(&request.verse_reference, &request.verse_text)?;

    let mode = request.profile.content_mode;
    let personalization = build_personalization_context(&request.profile);
    let system = prompts::story_system(mode, &personalization);
    let prompt = prompts::story_prompt(
        &request.verse_reference,
        &request.verse_text,
        request.source.as_deref(),
        mode,
        request.story_type,
    );

    let text = state.llm.call(&prompt, &system, 8000).await?;

    let fields = extract_fields(
        &text,
        &[
            FieldSpec::new("TITLE", "A Story of Faith"),
            FieldSpec::new("STORY", text.trim()),
            FieldSpec::new(
                "IMAGE",
                "A beautiful Islamic scene with geometric patterns and peaceful atmosphere",
            ),
        ],
    );

    Ok(Json(StoryResponse {
        title: fields["TITLE"].clone(),
        text: fields["STORY"].clone(),
        image_prompt: fields["IMAGE"].clone(),
    }))
}

/// POST /api/v1/generate/stories
///
/// A contemporary/historical story pair from a single model call.
pub async fn handle_stories(
    State(state): State<AppState>,
    Json(request): Json<StoriesRequest>,
) -> Result<Json<StoriesResponse>, AppError> {
    validate_verse(&request.verse_reference, &request.verse_text)?;

    let language = request.language.as_deref().unwrap_or("en");
    let system = prompts::stories_system(
        request.profile.age_range,
        request.profile.tradition,
        language,
    );
    let prompt = prompts::stories_prompt(
        &request.verse_reference,
        &request.verse_text,
        age_label(request.profile.age_range),
        &request.profile.stage_situation,
    );

    let text = state.llm.call(&prompt, &system, 8000).await?;
    let stories = parse_story_pair(&text);

    Ok(Json(StoriesResponse { stories }))
}

/// POST /api/v1/generate/poetry
///
/// Two poem variants generated in parallel: one classic, one free verse.
/// Both branches must succeed; there is no partial-result path.
pub async fn handle_poetry(
    State(state): State<AppState>,
    Json(request): Json<PoetryRequest>,
) -> Result<Json<PoetryResponse>, AppError> {
    validate_verse(&request.verse_reference, &request.verse_text)?;

    let personalization = build_personalization_context(&request.profile);
    let system = prompts::poetry_system(request.profile.tradition, &personalization);

    let classic_prompt =
        prompts::poetry_prompt(&request.verse_reference, &request.verse_text, PoemStyle::Classic);
    let free_prompt =
        prompts::poetry_prompt(&request.verse_reference, &request.verse_text, PoemStyle::Free);

    let (classic, free) = tokio::join!(
        state.llm.call(&classic_prompt, &system, 1000),
        state.llm.call(&free_prompt, &system, 1000),
    );
    let (classic, free) = (classic?, free?);

    Ok(Json(PoetryResponse {
        poetry: vec![
            parse_poem(&classic, PoemStyle::Classic),
            parse_poem(&free, PoemStyle::Free),
        ],
    }))
}

/// POST /api/v1/generate/context
///
/// Historical background for the verse, as a structured JSON object.
pub async fn handle_context(
    State(state): State<AppState>,
    Json(request): Json<ContextRequest>,
) -> Result<Json<ContextResponse>, AppError> {
    validate_verse(&request.verse_reference, &request.verse_text)?;

    let mode = request.profile.content_mode;
    let personalization = build_personalization_context(&request.profile);
    let guidance = prompts::context_source_guidance(
        &request.verse_reference,
        request.source.as_deref(),
        mode,
    );
    let system = prompts::context_system(mode, guidance, &personalization);
    let prompt = prompts::context_prompt(
        &request.verse_reference,
        &request.verse_text,
        request.source.as_deref(),
        mode,
    );
    let max_tokens = match mode {
        ContentMode::Academic => 8000,
        ContentMode::Casual => 5000,
    };

    let text = state.llm.call(&prompt, &system, max_tokens).await?;
    let value = clean_json_value(extract_json(&text)?);
    let response: ContextResponse =
        serde_json::from_value(value).map_err(ExtractError::from)?;

    Ok(Json(response))
}

/// POST /api/v1/generate/imagery
///
/// Four symbols/themes found in the verse, as structured JSON.
pub async fn handle_imagery(
    State(state): State<AppState>,
    Json(request): Json<ImageryRequest>,
) -> Result<Json<ImageryResponse>, AppError> {
    validate_verse(&request.verse_reference, &request.verse_text)?;

    let mode = request.profile.content_mode;
    let personalization = build_personalization_context(&request.profile);
    let system = prompts::imagery_system(mode, &personalization);
    let prompt = prompts::imagery_prompt(
        &request.verse_reference,
        &request.verse_text,
        request.source.as_deref(),
        mode,
    );
    let max_tokens = match mode {
        ContentMode::Academic => 5000,
        ContentMode::Casual => 3500,
    };

    let text = state.llm.call(&prompt, &system, max_tokens).await?;
    let value = clean_json_value(extract_json(&text)?);
    let response: ImageryResponse =
        serde_json::from_value(value).map_err(ExtractError::from)?;

    Ok(Json(response))
}

/// POST /api/v1/generate/verse
///
/// Selects a scripture text from the requested source, or resolves a
/// free-text query. A failed primary source falls back to the daily ayah.
pub async fn handle_verse(
    State(state): State<AppState>,
    Json(request): Json<VerseRequest>,
) -> Result<Json<VerseResponse>, AppError> {
    if let Some(query) = request.verse_query.as_deref().filter(|q| !q.trim().is_empty()) {
        let verse = lookup_verse(&state.llm, query).await?;
        return Ok(Json(verse));
    }

    let source = request.source.unwrap_or_default();
    match fetch_verse(&state.llm, source).await {
        Ok(verse) => Ok(Json(verse)),
        Err(err) => {
            warn!("Primary scripture source failed, falling back to daily ayah: {err}");
            let verse = fetch_verse(&state.llm, ScriptureSource::DailyAyah).await?;
            Ok(Json(verse))
        }
    }
}

/// POST /api/v1/chat
///
/// Conversational exploration of one verse, with windowed history.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }
    validate_verse(&request.verse_reference, &request.verse_text)?;

    let system = prompts::chat_system(
        &request.verse_reference,
        &request.verse_text,
        request.source.as_deref(),
        request.profile.tradition,
    );
    let history = request.history.unwrap_or_default();
    let prompt = prompts::build_chat_prompt(&history, &request.message);

    let response = state.llm.call(&prompt, &system, 500).await?;

    Ok(Json(ChatResponse { response }))
}

// ────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ────────────────────────────────────────────────────────────────────────────

fn validate_verse(reference: &str, text: &str) -> Result<(), AppError> {
    if reference.trim().is_empty() {
        return Err(AppError::Validation(
            "verse_reference cannot be empty".to_string(),
        ));
    }
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "verse_text cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn age_label(age: AgeRange) -> &'static str {
    match age {
        AgeRange::Child => "a child",
        AgeRange::Teen => "a teenager",
        AgeRange::Youth => "a young adult",
        AgeRange::Adult => "an adult",
        AgeRange::Senior => "a senior",
        AgeRange::Unspecified => "a reader",
    }
}

/// Parses one poem from delimited output. When the model skips the POEM
/// delimiters entirely the whole raw text stands in for the poem body.
fn parse_poem(text: &str, style: PoemStyle) -> Poem {
    let fields = extract_fields(
        text,
        &[
            FieldSpec::new("TITLE", "Untitled Poem"),
            FieldSpec::new("TYPE", style.display_name()),
            FieldSpec::new("POEM", text.trim()),
            FieldSpec::new(
                "IMAGE",
                "Beautiful Islamic geometric patterns with calligraphy",
            ),
        ],
    );
    Poem {
        title: fields["TITLE"].clone(),
        poem_type: fields["TYPE"].clone(),
        text: fields["POEM"].clone(),
        image_prompt: fields["IMAGE"].clone(),
    }
}

/// Parses the two-story response. Missing pieces degrade per field; a
/// half-delimited response still yields both cards.
fn parse_story_pair(text: &str) -> Vec<StoryCard> {
    let fields = extract_fields(
        text,
        &[
            FieldSpec::new("STORY_1_TITLE", "A Story of Faith"),
            FieldSpec::new(
                "STORY_1_TEXT",
                "We couldn't generate this story. Please try again.",
            ),
            FieldSpec::new("STORY_1_IMAGE", "A warm, peaceful scene from the story"),
            FieldSpec::new("STORY_2_TITLE", "A Story from Islamic History"),
            FieldSpec::new(
                "STORY_2_TEXT",
                "We couldn't generate this story. Please try again.",
            ),
            FieldSpec::new("STORY_2_IMAGE", "A traditional scene from Islamic history"),
        ],
    );
    vec![
        StoryCard {
            title: fields["STORY_1_TITLE"].clone(),
            text: fields["STORY_1_TEXT"].clone(),
            image_prompt: fields["STORY_1_IMAGE"].clone(),
        },
        StoryCard {
            title: fields["STORY_2_TITLE"].clone(),
            text: fields["STORY_2_TEXT"].clone(),
            image_prompt: fields["STORY_2_IMAGE"].clone(),
        },
    ]
}
