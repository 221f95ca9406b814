//! Scripture source selection — JSON-mode fetchers for the verse endpoint.
//!
//! Each source has its own selection prompt; all of them ask the model for a
//! bare JSON object with the same four fields. A failed primary source falls
//! back to the daily ayah once before the endpoint gives up.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extraction::clean::clean_json_value;
use crate::extraction::json::{extract_json, ExtractError};
use crate::llm_client::LlmClient;

const VERSE_MAX_TOKENS: u32 = 500;

/// Islamic scripture and wisdom sources selectable by the caller.
/// Unknown values collapse to the daily ayah, which is also the fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ScriptureSource {
    Quran,
    Hadith,
    NamesOfAllah,
    ProphetStories,
    Dua,
    SufiWisdom,
    #[default]
    #[serde(other)]
    DailyAyah,
}

/// One selected scripture text, as returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerseResponse {
    pub reference: String,
    pub version: String,
    pub text: String,
    pub source: String,
}

const JSON_SHAPE: &str = r#"Return ONLY a JSON object with this structure:
{
  "reference": "...",
  "version": "...",
  "text": "...",
  "source": "..."
}"#;

fn daily_ayah_prompt() -> String {
    let today = Utc::now().format("%B %-d, %Y");
    format!(
        "Today is {today}. Select a meaningful ayah (verse) from the Quran that would be \
         spiritually beneficial for a Muslim's daily reflection.\n\n\
         {JSON_SHAPE}\n\n\
         \"reference\" is the Surah name and numbers - e.g. 'Al-Baqarah (2:255)' or \
         'Al-Fatiha (1:1-7)'. \"version\" and \"source\" are \"Quran\". \"text\" is the \
         Arabic transliteration followed by English translation; use a respected translation \
         (Sahih International, Yusuf Ali, or Pickthall).\n\n\
         Choose ayat that are well-known, spiritually uplifting, or contain important \
         guidance.\n\
         Return only the JSON, no explanation."
    )
}

const QURAN_PROMPT: &str = r#"Select a powerful, meaningful ayah from the Quran for spiritual reflection.

Return ONLY a JSON object with this structure:
{
  "reference": "Surah Name (Surah Number:Ayah Number)",
  "version": "Quran",
  "text": "Arabic transliteration followed by English translation",
  "source": "Quran"
}

Choose from well-known surahs and ayat that are frequently recited or contain core Islamic teachings.
Return only the JSON, no explanation."#;

const HADITH_PROMPT: &str = r#"Select a meaningful, authentic hadith from Sahih Bukhari, Sahih Muslim, or other reliable collections.

Return ONLY a JSON object with this structure:
{
  "reference": "Collection, Book/Kitab, Hadith Number - e.g., 'Sahih Bukhari, Book of Faith, Hadith 8' or 'Sahih Muslim 2564'",
  "version": "Hadith",
  "text": "The hadith text in English translation",
  "source": "Hadith"
}

Choose well-known hadith that offer practical guidance or spiritual insight. Prefer sahih (authentic) hadith.
Return only the JSON, no explanation."#;

const NAMES_OF_ALLAH_PROMPT: &str = r#"Select one of the 99 Names of Allah (Asma ul-Husna) for reflection.

Return ONLY a JSON object with this structure:
{
  "reference": "The Arabic Name - e.g., 'Ar-Rahman (الرحمن)' or 'Al-Wadud (الودود)'",
  "version": "Asma ul-Husna",
  "text": "The meaning in English and a brief explanation of this divine attribute",
  "source": "99 Names of Allah"
}

Include the Arabic, transliteration, and meaning.
Return only the JSON, no explanation."#;

const PROPHET_STORIES_PROMPT: &str = r#"Select a Quranic passage about one of the Prophets (peace be upon them) for reflection.

Return ONLY a JSON object with this structure:
{
  "reference": "Surah Name (Surah:Ayah) - Story of Prophet [Name]",
  "version": "Quran",
  "text": "The Quranic passage about this Prophet with English translation",
  "source": "Stories of the Prophets"
}

Choose passages about Prophet Ibrahim, Musa, Yusuf, Isa, or other prophets mentioned in the Quran.
Return only the JSON, no explanation."#;

const DUA_PROMPT: &str = r#"Select a beautiful du'a (supplication) from the Quran or authentic Sunnah.

Return ONLY a JSON object with this structure:
{
  "reference": "Source - e.g., 'Quran, Al-Baqarah 2:201' or 'Hisnul Muslim, Morning Adhkar'",
  "version": "Du'a",
  "text": "Arabic transliteration and English translation of the du'a",
  "source": "Du'a"
}

Choose well-known supplications that Muslims recite regularly.
Return only the JSON, no explanation."#;

const SUFI_WISDOM_PROMPT: &str = r#"Select a piece of wisdom from classical Sufi masters - Rumi, Ibn Arabi, al-Ghazali, Rabia al-Adawiyya, or other respected Sufi scholars.

Return ONLY a JSON object with this structure:
{
  "reference": "Author and Work - e.g., 'Rumi, Masnavi' or 'Al-Ghazali, Ihya Ulum al-Din'",
  "version": "Sufi",
  "text": "The teaching or poem with English translation if originally in Arabic/Persian",
  "source": "Sufi Wisdom"
}

Choose teachings that align with orthodox Islam while offering spiritual depth.
Return only the JSON, no explanation."#;

fn selection_prompt(source: ScriptureSource) -> String {
    match source {
        ScriptureSource::DailyAyah => daily_ayah_prompt(),
        ScriptureSource::Quran => QURAN_PROMPT.to_string(),
        ScriptureSource::Hadith => HADITH_PROMPT.to_string(),
        ScriptureSource::NamesOfAllah => NAMES_OF_ALLAH_PROMPT.to_string(),
        ScriptureSource::ProphetStories => PROPHET_STORIES_PROMPT.to_string(),
        ScriptureSource::Dua => DUA_PROMPT.to_string(),
        ScriptureSource::SufiWisdom => SUFI_WISDOM_PROMPT.to_string(),
    }
}

/// Asks the model to select a text from the given source.
pub async fn fetch_verse(
    llm: &LlmClient,
    source: ScriptureSource,
) -> Result<VerseResponse, AppError> {
    let prompt = selection_prompt(source);
    let text = llm.call(&prompt, "", VERSE_MAX_TOKENS).await?;
    parse_verse(&text)
}

/// Resolves a free-text verse query ("the ayah about burdens") to one text.
pub async fn lookup_verse(llm: &LlmClient, query: &str) -> Result<VerseResponse, AppError> {
    let prompt = format!(
        "Return ONLY a JSON object for the Islamic text: {query}\n\n\
         This could be from the Quran, Hadith, Du'a collections, or other Islamic sources.\n\n\
         Return ONLY this JSON structure, no markdown, no explanation:\n\
         {{\n\
           \"reference\": \"The proper Islamic reference format\",\n\
           \"version\": \"Quran\" or \"Hadith\" or \"Du'a\" or appropriate source,\n\
           \"text\": \"The text with Arabic transliteration and English translation\",\n\
           \"source\": \"Quran\" or \"Hadith\" or \"Du'a\" or \"Sufi Wisdom\" etc.\n\
         }}"
    );
    let text = llm.call(&prompt, "", VERSE_MAX_TOKENS).await?;
    parse_verse(&text)
}

fn parse_verse(raw: &str) -> Result<VerseResponse, AppError> {
    let value = clean_json_value(extract_json(raw)?);
    let verse = serde_json::from_value(value).map_err(ExtractError::from)?;
    Ok(verse)
}
