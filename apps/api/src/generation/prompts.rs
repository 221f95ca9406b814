//! All LLM prompt constants and builders for the Generation module.
//!
//! Every system prompt ends with the personalization context assembled from
//! the reader profile, so tone steering is applied uniformly across
//! endpoints. Delimiter and JSON format contracts declared here must match
//! what the handlers extract.

use crate::personalization::{AgeRange, ContentMode, Tradition};

/// Instruction appended to every plain-prose system prompt. The cleanup pass
/// still scrubs whatever leaks through.
pub const PLAIN_TEXT_GUARD: &str = "CRITICAL: Write ONLY plain prose text. NO URLs, NO links, \
    NO citations, NO bracketed text, NO markdown formatting, NO asterisks, NO underscores for \
    emphasis.";

/// Display names for supported content languages. Unknown codes fall back to
/// English, which also suppresses the language instruction.
pub fn language_name(code: &str) -> &'static str {
    match code {
        "en" => "English",
        "ar" => "Arabic (العربية)",
        "ur" => "Urdu (اردو)",
        "id" => "Indonesian (Bahasa Indonesia)",
        "ms" => "Malay (Bahasa Melayu)",
        "tr" => "Turkish (Türkçe)",
        "fr" => "French (Français)",
        "es" => "Spanish (Español)",
        "bn" => "Bengali (বাংলা)",
        "fa" => "Persian/Farsi (فارسی)",
        _ => "English",
    }
}

/// Language steering for non-English requests. Delimiters stay English; only
/// the content between them changes language.
pub fn language_instruction(code: &str) -> Option<String> {
    if code.is_empty() || code == "en" || language_name(code) == "English" {
        return None;
    }
    let name = language_name(code);
    Some(format!(
        "CRITICAL LANGUAGE REQUIREMENT: You MUST write your entire response in {name}. Every \
         single word of the content must be in {name}. Do NOT write in English. The delimiters \
         stay in English, but ALL content between them must be in {name}."
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Interpretation
// ────────────────────────────────────────────────────────────────────────────

const CASUAL_DEVOTIONAL_CONTEXT: &str = "You are creating Islamic devotional content for Muslim readers.

Key guidelines:
- Use Islamic terminology naturally (Allah, Prophet (peace be upon him), Quran, Sunnah, taqwa, iman, etc.)
- Include \"peace be upon him\" when mentioning the Prophet Muhammad
- Reference tafsir (Quranic commentary) and hadith where relevant
- Connect texts to Muslim life - salah, fasting, zakat, family, community
- Honor the diversity of the ummah while maintaining Islamic authenticity
- Maintain a tone of reverence, warmth, and Islamic adab (etiquette)
- Use \"Allah\" rather than \"God\" in most contexts";

const ACADEMIC_SCHOLAR_CONTEXT: &str = "You are an Islamic studies scholar providing rigorous \
    analysis rooted in the Quranic sciences. Draw on classical tafsir, hadith literature, and \
    modern scholarship while maintaining reverence for the sacred text.";

pub fn interpretation_system(mode: ContentMode, language: &str, personalization: &str) -> String {
    let islamic_context = match mode {
        ContentMode::Academic => ACADEMIC_SCHOLAR_CONTEXT,
        ContentMode::Casual => CASUAL_DEVOTIONAL_CONTEXT,
    };
    let mut system = format!("{islamic_context}\n\n{PLAIN_TEXT_GUARD}");
    if let Some(lang) = language_instruction(language) {
        system.push_str("\n\n");
        system.push_str(&lang);
    }
    system.push_str("\n\n");
    system.push_str(personalization);
    system
}

pub fn interpretation_word_limit(mode: ContentMode) -> &'static str {
    match mode {
        ContentMode::Academic => "500-700 words with scholarly depth",
        ContentMode::Casual => "350-450 words of meaningful reflection",
    }
}

pub fn interpretation_prompt(
    reference: &str,
    verse_text: &str,
    source: Option<&str>,
    mode: ContentMode,
    language: &str,
) -> String {
    let instruction = match mode {
        ContentMode::Academic => {
            "Write a comprehensive scholarly tafsir (exegesis) of this text. Include Arabic \
             linguistic analysis, cite classical mufassirun (Ibn Kathir, al-Tabari, al-Qurtubi), \
             reference relevant hadith, and engage with modern Islamic scholarship. Maintain \
             academic rigor while being spiritually insightful. Be thorough and detailed."
        }
        ContentMode::Casual => {
            "Write a rich, reflective commentary on this text in a warm, personal tone. This \
             should feel like something a wise imam or Islamic teacher might share - genuine, \
             spiritually nourishing, and connecting the sacred text to real life today. Explore \
             the deeper meanings. Help the reader apply this wisdom in their daily life as a \
             Muslim."
        }
    };
    let kind = match mode {
        ContentMode::Academic => "scholarly tafsir",
        ContentMode::Casual => "reflective commentary",
    };
    let word_limit = interpretation_word_limit(mode);
    let source_line = source
        .filter(|s| !s.is_empty())
        .map(|s| format!("(Source: {s})\n"))
        .unwrap_or_default();
    let reminder = language_instruction(language)
        .map(|_| {
            format!(
                "REMINDER: Write your interpretation in {}, NOT English.\n\n",
                language_name(language)
            )
        })
        .unwrap_or_default();

    format!(
        "{reference}: \"{verse_text}\"\n{source_line}\n{reminder}{instruction}\n\n\
         Write ONLY plain text - no URLs, no links, no citations, no brackets, no asterisks.\n\n\
         IMPORTANT: Write a FULL, COMPLETE response of {word_limit}. Do not cut short. Provide \
         rich, meaningful content.\n\n\
         Format your response EXACTLY like this:\n\n\
         INTERPRETATION===\n\
         Your {kind} here... ({word_limit})\n\
         ===INTERPRETATION\n\n\
         IMAGE_PROMPT===\n\
         Cinematic description of an inspiring scene that captures the text's theme. Consider \
         Islamic geometric patterns, mosques, nature scenes, calligraphy, or scenes from \
         Islamic history. Always respectful and appropriate - no depictions of prophets or \
         Allah.\n\
         ===IMAGE_PROMPT"
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Poems and poetry
// ────────────────────────────────────────────────────────────────────────────

/// Requested poem form. Anything other than "classic" is treated as free
/// verse, matching the permissive request vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoemStyle {
    Classic,
    #[default]
    #[serde(other)]
    Free,
}

impl PoemStyle {
    pub fn display_name(self) -> &'static str {
        match self {
            PoemStyle::Classic => "Nasheed Style",
            PoemStyle::Free => "Free Verse",
        }
    }
}

pub fn poem_system(mode: ContentMode, personalization: &str) -> String {
    match mode {
        ContentMode::Academic => format!(
            "You are a literary poet with expertise in Islamic poetry traditions - from \
             classical Arabic qasidas through Persian Sufi poetry to modern Islamic verse. \
             Write poetry that combines literary sophistication with deep faith.\n\n\
             {PLAIN_TEXT_GUARD}\n\n{personalization}"
        ),
        ContentMode::Casual => format!(
            "You are a gifted Muslim poet writing verse that praises Allah and inspires faith. \
             Your poems reflect love for Allah, reverence for the Prophet (peace be upon him), \
             and the beauty of Islam.\n\n\
             Your poems have:\n\
             - Beautiful rhythm and flow\n\
             - Rich imagery drawn from Islamic tradition and nature\n\
             - Arabic phrases used naturally where they add meaning (SubhanAllah, \
             Alhamdulillah, etc.)\n\
             - Themes of tawhid, gratitude, seeking Allah's mercy, and spiritual aspiration\n\
             - Universal human emotions through an Islamic lens\n\n\
             {PLAIN_TEXT_GUARD}\n\n{personalization}"
        ),
    }
}

fn poem_style_guide(mode: ContentMode, style: PoemStyle) -> &'static str {
    match (mode, style) {
        (ContentMode::Academic, PoemStyle::Classic) => {
            "Write a formally structured poem in the tradition of classical Islamic poetry - \
             the qasida form or the ghazal. Draw on the rich tradition of Arabic and Persian \
             Islamic poetry from poets like Rumi, Hafiz, and Ibn Arabi. Include sophisticated \
             imagery, metaphor, and spiritual depth. The poem should reward multiple readings."
        }
        (ContentMode::Academic, PoemStyle::Free) => {
            "Write a literary free verse poem with sophisticated imagery and theological depth. \
             Reference the tradition of modern Islamic poetry while engaging deeply with \
             Quranic themes. Use imagery drawn from Islamic experience, nature, and the \
             spiritual journey."
        }
        (ContentMode::Casual, PoemStyle::Classic) => {
            "Write a NASHEED-STYLE poem - something that could be recited or sung in praise of \
             Allah or as spiritual reflection. Clear rhythm and structure. Traditional Islamic \
             poetic form. Something that elevates the soul and praises the Creator."
        }
        (ContentMode::Casual, PoemStyle::Free) => {
            "Write a FREE VERSE poem with vivid imagery and Islamic spiritual themes, no strict \
             rhyme required. The poem should flow naturally, paint pictures with words, and \
             inspire faith. Something that might be shared at an Islamic gathering or personal \
             reflection."
        }
    }
}

pub fn poem_prompt(
    reference: &str,
    verse_text: &str,
    source: Option<&str>,
    mode: ContentMode,
    style: PoemStyle,
) -> String {
    let style_label = match style {
        PoemStyle::Classic => "NASHEED-STYLE (Classic)",
        PoemStyle::Free => "FREE VERSE",
    };
    let line_count = match mode {
        ContentMode::Academic => "20-32 lines",
        ContentMode::Casual => "16-24 lines",
    };
    let depth = match mode {
        ContentMode::Academic => "Literary sophistication and theological depth",
        ContentMode::Casual => "Spiritual warmth and accessibility",
    };
    let style_guide = poem_style_guide(mode, style);
    let source_line = source
        .filter(|s| !s.is_empty())
        .map(|s| format!("(From: {s})\n"))
        .unwrap_or_default();

    format!(
        "Generate 1 beautiful {style_label} poem inspired by {reference}: \"{verse_text}\"\n\
         {source_line}\n\
         {style_guide}\n\n\
         Requirements:\n\
         - {line_count} total (this is a COMPLETE poem, not a snippet)\n\
         - Clear stanzas with blank lines between them\n\
         - Rich imagery from Islamic tradition, nature, and spiritual experience\n\
         - {depth}\n\
         - May include Arabic phrases where they add beauty (SubhanAllah, Alhamdulillah, \
         Allahu Akbar, etc.)\n\n\
         Respond in this EXACT format:\n\
         TITLE===Your Poem Title===TITLE\n\
         POEM===\n\
         First line of poem\n\
         Second line of poem\n\
         Third line of poem\n\n\
         Fourth line (new stanza)\n\
         Fifth line\n\
         Sixth line\n\n\
         (continue for {line_count})\n\
         ===POEM\n\
         IMAGE===Detailed visual description for artwork - Islamic geometric patterns, \
         calligraphy, mosque architecture, nature scenes. NO depictions of prophets or \
         Allah.===IMAGE"
    )
}

/// Poetry register per tradition, used by the two-poem endpoint.
pub fn tradition_poetry_style(tradition: Tradition) -> &'static str {
    match tradition {
        Tradition::Sunni => "grounded in Quranic imagery and the Sunnah, measured and reverent",
        Tradition::Shia => {
            "devotional depth, themes of love for the Ahl al-Bayt, longing and loyalty"
        }
        Tradition::Sufi => {
            "ecstatic imagery in the manner of Rumi and Hafiz, the heart turning toward the Beloved"
        }
        Tradition::General => {
            "accessible Islamic devotional verse drawing on shared themes of praise and gratitude"
        }
    }
}

pub fn poetry_system(tradition: Tradition, personalization: &str) -> String {
    format!(
        "You are a gifted poet who writes beautiful, emotionally resonant poetry inspired by \
         Islamic wisdom. Your poems have proper structure with line breaks, stanzas, and poetic \
         rhythm. Write in a warm, accessible style that touches the heart.\n\n\
         Poetry style guidance for this reader: {}\n\n{personalization}",
        tradition_poetry_style(tradition)
    )
}

pub fn poetry_prompt(reference: &str, verse_text: &str, style: PoemStyle) -> String {
    let (label, type_line, form_lines) = match style {
        PoemStyle::Classic => (
            "NASHEED STYLE (Classic)",
            "TYPE===Nasheed Style===TYPE",
            "- Use rhythm and possibly rhyme\n\
             - Include stanzas\n\
             - Use poetic devices like imagery and metaphor\n\
             - Draw on traditional Islamic poetic forms (nasheeds, qasida verses)",
        ),
        PoemStyle::Free => (
            "FREE VERSE",
            "TYPE===Free Verse===TYPE",
            "- Free verse style (no strict rhyme required)\n\
             - Include stanzas\n\
             - Use vivid imagery and metaphor\n\
             - Contemporary voice, accessible",
        ),
    };

    format!(
        "Generate 1 beautiful {label} poem inspired by this Islamic teaching - {reference}: \
         \"{verse_text}\"\n\n\
         Write a REAL POEM with proper poetic structure:\n\
         - 8-16 lines total\n\
         {form_lines}\n\n\
         Respond in this EXACT format with delimiters:\n\
         TITLE===Your Poem Title Here===TITLE\n\
         {type_line}\n\
         POEM===\n\
         Line one of the poem\n\
         Line two of the poem\n\n\
         Line three (new stanza)\n\
         Line four\n\
         ===POEM\n\
         IMAGE===Ethereal artistic visual description for this poem - peaceful, contemplative \
         imagery===IMAGE"
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Stories
// ────────────────────────────────────────────────────────────────────────────

/// Requested story setting. Anything unrecognized is treated as contemporary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryKind {
    Historical,
    #[default]
    #[serde(other)]
    Contemporary,
}

fn story_scenario(mode: ContentMode, kind: StoryKind) -> &'static str {
    match (mode, kind) {
        (ContentMode::Casual, StoryKind::Contemporary) => {
            "Write a modern-day story set in contemporary Muslim life.\n\n\
             Settings could include: a Muslim family home, a masjid (mosque), an Islamic \
             school, a halal restaurant, Ramadan iftars, Eid celebrations, a Muslim community \
             center, Hajj preparation, a Muslim student's experience, an interfaith encounter, \
             workplace challenges as a Muslim, a convert's journey...\n\n\
             Focus on realistic situations Muslims face today - balancing faith and modern \
             life, raising Muslim children in the West, maintaining salah at work, Ramadan \
             while working, dealing with Islamophobia with dignity, finding a spouse the halal \
             way, community life, family relationships.\n\n\
             Use Islamic terminology naturally (masjid, salah, du'a, inshallah, alhamdulillah, \
             etc.) but make it feel authentic, not forced. Show how faith guides real Muslim \
             lives."
        }
        (ContentMode::Casual, StoryKind::Historical) => {
            "Write a story set in Islamic history that brings this text to life.\n\n\
             Options include:\n\
             - The time of the Prophet (peace be upon him): Makkah, Madinah, the Companions\n\
             - The Khulafa Rashidun: Abu Bakr, Umar, Uthman, Ali (may Allah be pleased with \
             them)\n\
             - The Golden Age: Baghdad, Cordoba, scholars and scientists\n\
             - Great Muslim figures: Salahuddin, scholars, sufis, explorers\n\
             - The spread of Islam: Africa, Asia, Al-Andalus\n\n\
             IMPORTANT: Never put words in the Prophet's (peace be upon him) mouth that aren't \
             from hadith. Never depict him speaking directly. Show him through the eyes of \
             Companions.\n\n\
             Make historical figures feel real and relatable. Show their taqwa, their \
             struggles, their humanity."
        }
        (ContentMode::Academic, StoryKind::Contemporary) => {
            "Write a thoughtful modern narrative that explores the theological and practical \
             implications of this text. Include realistic scenarios where contemporary Muslims \
             grapple with applying Quranic wisdom and Prophetic guidance to modern ethical \
             dilemmas. Reference different scholarly perspectives."
        }
        (ContentMode::Academic, StoryKind::Historical) => {
            "Write a historically rigorous narrative set in the actual time and place of this \
             text.\n\n\
             Include accurate historical details - the social structures of 7th century Arabia, \
             the early Muslim community, material culture of the period. For hadith, accurately \
             portray the setting based on the narration.\n\n\
             CRITICAL: Never directly depict the Prophet (peace be upon him) speaking or acting \
             unless quoting sahih hadith. Show events through the perspective of Companions or \
             other historical figures.\n\n\
             The story should be both engaging and educational, helping readers understand the \
             historical context of Islam's development."
        }
    }
}

pub fn story_system(mode: ContentMode, personalization: &str) -> String {
    match mode {
        ContentMode::Academic => format!(
            "You are a historical fiction writer with deep expertise in Islamic history and \
             scholarship. Write stories that are both engaging and historically rigorous.\n\n\
             CRITICAL ISLAMIC GUIDELINES:\n\
             - NEVER directly depict the Prophet Muhammad (peace be upon him) speaking or \
             acting (show through others' perspectives)\n\
             - NEVER invent hadith or attribute false sayings to the Prophet\n\
             - Maintain historical accuracy based on seerah and hadith literature\n\
             - Be respectful of all Companions and early Muslims\n\n\
             {PLAIN_TEXT_GUARD}\n\n{personalization}"
        ),
        ContentMode::Casual => format!(
            "You are a gifted Muslim storyteller creating stories that touch the heart and \
             illuminate Islamic teachings. Your stories feel authentically Muslim - grounded in \
             faith, family, and community.\n\n\
             Your stories should:\n\
             - Feel genuine to the Muslim experience\n\
             - Show how Islam guides real life\n\
             - Include Islamic terminology naturally (inshallah, alhamdulillah, masjid, salah, \
             etc.)\n\
             - NEVER put words in the Prophet's (peace be upon him) mouth - always use \"The \
             Prophet said...\" and quote authentic hadith\n\
             - Never be preachy - show, don't lecture\n\
             - Have real conflict, real emotion, real resolution\n\
             - Be appropriate for all Muslims\n\n\
             {PLAIN_TEXT_GUARD}\n\n{personalization}"
        ),
    }
}

pub fn story_prompt(
    reference: &str,
    verse_text: &str,
    source: Option<&str>,
    mode: ContentMode,
    kind: StoryKind,
) -> String {
    let word_count = match mode {
        ContentMode::Academic => "1000-1200",
        ContentMode::Casual => "800-1000",
    };
    let scenario = story_scenario(mode, kind);
    let source_line = source
        .filter(|s| !s.is_empty())
        .map(|s| format!("(Source: {s})\n"))
        .unwrap_or_default();

    format!(
        "Create ONE powerful, complete story that brings this teaching to life: {reference}: \
         \"{verse_text}\"\n{source_line}\n\
         {scenario}\n\n\
         CRITICAL LENGTH REQUIREMENT: The story MUST be {word_count} words. This is a FULL \
         story, not a summary.\n\n\
         Include:\n\
         - Detailed scene setting with sensory details\n\
         - Multiple characters with distinct personalities\n\
         - Natural dialogue (remember: never invent the Prophet's words)\n\
         - Deep internal thoughts and moments of spiritual insight\n\
         - A clear narrative arc with compelling setup, meaningful conflict, and satisfying \
         resolution\n\
         - Moments that touch the heart\n\
         - A powerful connection to the Islamic teaching\n\n\
         Format response EXACTLY like this:\n\
         TITLE===Your Story Title===TITLE\n\
         STORY===Your full story text ({word_count} words, plain prose, no \
         formatting)===STORY\n\
         IMAGE===Cinematic scene description - NO depictions of prophets. Use mosque \
         interiors, geometric patterns, landscapes, calligraphy, historical \
         settings===IMAGE"
    )
}

/// Age-calibrated scenario guidance for the two-story endpoint. The teen
/// block carries worked examples because that band drifts off-age most.
pub fn age_story_guidance(age: AgeRange) -> &'static str {
    match age {
        AgeRange::Teen => {
            "EXAMPLES OF GOOD TEEN STORIES (use these as inspiration, but create NEW unique scenarios):

Example 1: \"The Empty Seat\"
Yusuf sat alone at lunch again, watching his old friends at their usual table. Since he started praying dhuhr in the resource room, the invitations had quietly stopped. His phone buzzed - another party he wouldn't go to. \"Maybe deen means being alone,\" he thought, picking at his sandwich.

Example 2: \"The Chemistry Grade\"
Khadija stared at the red mark on her test. Her parents sacrificed everything to move here. University applications were due in months. She felt her chest tighten in the crowded hallway, and under her breath she whispered, \"Hasbunallahu wa ni'mal wakeel,\" not sure she believed it yet.

Example 3: \"The Alarm for Fajr\"
Bilal's alarm went off at 5:40. He almost swiped it away like always, but the fight with his dad still stung, and something made him pause. Maybe wudu and ten quiet minutes wouldn't hurt.

YOUR TEEN CHARACTERS MUST:
- Be high school students (ages 14-18)
- Deal with school, friends, family, identity
- Have authentic teen concerns: grades, fitting in, social media, parent pressure, being visibly Muslim
- Use teen settings: school, bedroom, the masjid youth hall, a local coffee shop, family home
- Have part-time jobs if any: babysitting, tutoring, retail (NOT careers)

YOUR TEEN CHARACTERS MUST NEVER:
- Have professional careers or full-time jobs
- Pay rent, bills, or have mortgages
- Be parents with children
- Work in corporate offices, marketing firms, tech companies
- Have graduate degrees or specialized training
- Be over 19 years old"
        }
        AgeRange::Youth => {
            "EXAMPLES for college students and young adults (ages 18-30):
- Dorm life, apartment living, first time away from home
- Entry-level jobs, internships, career uncertainty
- The MSA, finding halal food on campus, praying between lectures
- Marriage questions, identity, finding community at the masjid
- NOT yet established careers with families"
        }
        AgeRange::Adult => {
            "EXAMPLES for adults (ages 31-55):
- Established careers: meetings, deadlines, work stress
- Family responsibilities: spouse, children, aging parents
- Keeping salah and Quran time amid busyness
- Work-life balance, career pivots, serving the community"
        }
        AgeRange::Senior => {
            "EXAMPLES for seniors (ages 55+):
- Retirement or late career
- Grandchildren, legacy, life reflection
- Health concerns, preparing for the Hereafter
- Deepening worship with more time available
- Wisdom from decades of experience"
        }
        AgeRange::Child | AgeRange::Unspecified => {
            "Create age-appropriate scenarios matching the reader's life stage"
        }
    }
}

pub fn stories_system(age: AgeRange, tradition: Tradition, language: &str) -> String {
    let guidance = age_story_guidance(age);
    let tradition_guidance = crate::personalization::fragments::tradition_fragment(tradition);
    let mut system = format!(
        "You are a master storyteller creating deeply relatable, age-appropriate modern \
         stories that connect Islamic teachings to real life.\n\n\
         {guidance}\n\n\
         TRADITION GUIDANCE: {tradition_guidance}\n\n\
         CRITICAL INSTRUCTION: Create UNIQUE, ORIGINAL scenarios. Do NOT repeat the examples. \
         Use them as inspiration for tone and age-appropriateness, then create completely NEW \
         situations.\n\n\
         Format your response with these delimiters:\n\
         STORY_1_TITLE===\n\
         [Story 1 title here]\n\
         ===STORY_1_TITLE\n\n\
         STORY_1_TEXT===\n\
         [Full story 1 text here - minimum 500 words with dialogue, emotion, vivid detail]\n\
         ===STORY_1_TEXT\n\n\
         STORY_1_IMAGE===\n\
         [Detailed image prompt for story 1, matching the age and scenario - peaceful, \
         contemplative imagery]\n\
         ===STORY_1_IMAGE\n\n\
         STORY_2_TITLE===\n\
         [Story 2 title here]\n\
         ===STORY_2_TITLE\n\n\
         STORY_2_TEXT===\n\
         [Full story 2 text here - minimum 500 words with dialogue, emotion, vivid detail]\n\
         ===STORY_2_TEXT\n\n\
         STORY_2_IMAGE===\n\
         [Detailed image prompt for story 2]\n\
         ===STORY_2_IMAGE"
    );
    if let Some(lang) = language_instruction(language) {
        system.push_str("\n\n");
        system.push_str(&lang);
    }
    system
}

pub fn stories_prompt(
    reference: &str,
    verse_text: &str,
    age_label: &str,
    situation: &str,
) -> String {
    let situation = if situation.is_empty() || situation == "Nothing special" {
        "on their faith journey"
    } else {
        situation
    };
    format!(
        "Create 2 completely unique stories that bring this teaching to life: {reference}: \
         \"{verse_text}\"\n\n\
         The reader is {age_label} and {situation}.\n\n\
         Story 1: Contemporary scenario - create a NEW original situation showing how this \
         teaching applies to modern Muslim life\n\
         Story 2: Historical story - a story from the time of the Prophet (peace be upon \
         him), the Companions, or later Islamic history that illuminates this teaching\n\n\
         Requirements:\n\
         - Each story MUST be 500+ words\n\
         - Rich dialogue showing authentic character voice\n\
         - Deep emotional moments that readers will feel\n\
         - Vivid sensory details (what characters see, hear, feel)\n\
         - Clear connection showing how the teaching speaks to the situation\n\
         - Characters that match the age range EXACTLY\n\
         - NEVER invent hadith or attribute false sayings to the Prophet (peace be upon him)\n\n\
         Be creative and original - surprise me with fresh scenarios!"
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Context and imagery (JSON mode)
// ────────────────────────────────────────────────────────────────────────────

/// Detects the scripture family from the reference/source so the context
/// endpoint can ask the right background questions.
pub fn context_source_guidance(
    reference: &str,
    source: Option<&str>,
    mode: ContentMode,
) -> &'static str {
    let source = source.unwrap_or_default();
    let lower = reference.to_lowercase();
    let is_quran = source.contains("Quran")
        || lower.contains("surah")
        || lower.contains("ayah")
        || lower.contains("al-");
    let is_hadith = source.contains("Hadith")
        || ["bukhari", "muslim", "tirmidhi", "nasa'i", "dawud", "majah"]
            .iter()
            .any(|c| lower.contains(c));
    let is_sufi = source.contains("Sufi")
        || ["rumi", "ghazali", "arabi", "rabia"]
            .iter()
            .any(|c| lower.contains(c));

    if is_quran {
        match mode {
            ContentMode::Academic => {
                "This is from the Quran. Your scholarly analysis MUST include:
- Asbab al-nuzul (occasions of revelation) if known
- Makki vs Madani classification
- Classical tafsir references (Ibn Kathir, al-Tabari, al-Qurtubi, al-Razi)
- Arabic linguistic analysis (i'rab, balagha)
- Relevant hadith that explain the ayah
- How the four madhabs interpret any practical implications"
            }
            ContentMode::Casual => {
                "This is from the Quran. Help readers understand:
- When was this revealed? (Makki or Madani period)
- What was happening when Allah revealed these words?
- Who was the Prophet (peace be upon him) speaking to?
- What context helps us understand the meaning?
- How does this connect to other parts of the Quran?"
            }
        }
    } else if is_hadith {
        match mode {
            ContentMode::Academic => {
                "This is a hadith. Your scholarly analysis MUST include:
- The hadith collection and grading (sahih, hasan, etc.)
- The narrator chain (isnad) significance
- Related hadith on the same topic
- How scholars have interpreted this hadith
- Fiqh implications across madhabs"
            }
            ContentMode::Casual => {
                "This is a hadith. Help readers understand:
- Who narrated this hadith?
- What was the situation when the Prophet (peace be upon him) said this?
- How have Muslim scholars understood this teaching?
- How does this apply to Muslim life today?"
            }
        }
    } else if is_sufi {
        match mode {
            ContentMode::Academic => {
                "This is from Sufi literature. Your scholarly analysis should include:
- The author's background and silsila (spiritual lineage)
- The work this comes from
- How it relates to Quranic and hadith sources
- The spiritual concepts (maqamat, ahwal) involved
- How mainstream scholars have received this teaching"
            }
            ContentMode::Casual => {
                "This is Sufi wisdom. Help readers understand:
- Who was this teacher?
- What spiritual station is being described?
- How does this connect to the Quran and Sunnah?
- What practical wisdom can Muslims take from this?"
            }
        }
    } else {
        "Provide context for this Islamic text - its source, historical background, and \
         significance in Muslim tradition."
    }
}

pub fn context_system(mode: ContentMode, source_guidance: &str, personalization: &str) -> String {
    match mode {
        ContentMode::Academic => format!(
            "You are an Islamic studies professor writing for an educated Muslim audience. \
             Your analysis must demonstrate deep knowledge of the Islamic sciences.\n\n\
             CRITICAL ACADEMIC REQUIREMENTS:\n\
             - Cite classical scholars BY NAME (Ibn Kathir, al-Nawawi, Ibn Taymiyyah, \
             al-Ghazali, etc.)\n\
             - Include Arabic terms with transliteration and meaning\n\
             - Reference primary sources (specific tafsir works, hadith collections)\n\
             - Note differences among madhabs where relevant\n\
             - Include relevant hadith with proper attribution\n\n\
             IMPORTANT: Each field should be 150-250 words of substantive scholarly content.\n\n\
             {source_guidance}\n\n{personalization}\n\n\
             CRITICAL: Write ONLY plain prose text. NO URLs, NO links, NO bracketed citations. \
             Mention scholars by name in the text itself."
        ),
        ContentMode::Casual => format!(
            "You're helping Muslims understand their sacred texts better - like a warm, \
             knowledgeable imam who makes Islamic knowledge accessible and relevant.\n\n\
             Use phrases like \"The scholars explain...\", \"SubhanAllah, notice how...\", \
             \"The Prophet (peace be upon him) was teaching...\"\n\n\
             IMPORTANT: Each field should be 100-200 words of rich, engaging content.\n\n\
             {source_guidance}\n\n{personalization}\n\n\
             {PLAIN_TEXT_GUARD}"
        ),
    }
}

pub fn context_prompt(
    reference: &str,
    verse_text: &str,
    source: Option<&str>,
    mode: ContentMode,
) -> String {
    let (verb, register, field_length) = match mode {
        ContentMode::Academic => (
            "Provide comprehensive scholarly context for",
            "Write as if for an Islamic studies journal. Cite scholars by name. Include Arabic terms.",
            "150-250 words of scholarly analysis",
        ),
        ContentMode::Casual => (
            "Provide rich background on",
            "Make this come alive! Help readers connect with the revelation and the Prophet's (peace be upon him) time.",
            "100-200 words of engaging explanation",
        ),
    };
    let source_line = source
        .filter(|s| !s.is_empty())
        .map(|s| format!("(Source: {s})\n"))
        .unwrap_or_default();

    format!(
        "{verb} {reference}: \"{verse_text}\"\n{source_line}\n\
         {register}\n\n\
         IMPORTANT: Each field must be {field_length}. Do not give brief answers.\n\n\
         Return ONLY a JSON object with this structure, no markdown, no bracketed citations, \
         no URLs:\n\
         {{\n\
           \"context\": {{\n\
             \"who_is_speaking\": \"{field_length} - Is this Allah speaking directly? The \
         Prophet narrating? An angel? Explain the speaker.\",\n\
             \"original_listeners\": \"{field_length} - Who first heard these words? The \
         Companions? A specific person? The Quraysh?\",\n\
             \"why_the_conversation\": \"{field_length} - What prompted this revelation or \
         teaching? What was the sabab al-nuzul?\",\n\
             \"historical_backdrop\": \"{field_length} - Was this Makki or Madani? What was \
         happening in the early Muslim community?\",\n\
             \"immediate_impact\": \"{field_length} - How did the Companions respond? What \
         changed after this revelation?\",\n\
             \"long_term_impact\": \"{field_length} - How has this text shaped Islamic \
         thought, law, and practice through the centuries?\",\n\
             \"setting\": \"{field_length} - Where was the Prophet? In Makkah? Madinah? On a \
         journey? Paint the scene.\"\n\
           }},\n\
           \"context_image_prompt\": \"Cinematic scene from Islamic history - respectful, no \
         depictions of prophets. Consider: Madinah, a mosque, desert landscape, Islamic \
         architecture, geometric patterns, calligraphy.\"\n\
         }}"
    )
}

pub fn imagery_system(mode: ContentMode, personalization: &str) -> String {
    match mode {
        ContentMode::Academic => format!(
            "You are an Islamic studies scholar analyzing Quranic symbolism and imagery. \
             Provide deep analysis with references to Arabic linguistics, classical tafsir, \
             and scholarly interpretation of Quranic imagery.\n\n\
             Include: Arabic word roots and their symbolic significance, how classical \
             mufassirun interpreted these images, connections to other Quranic passages with \
             similar imagery, scholarly perspectives on Islamic symbolism.\n\n\
             IMPORTANT: Each symbol explanation should be 100-150 words of substantive \
             scholarly analysis.\n\n\
             {PLAIN_TEXT_GUARD}\n\n{personalization}"
        ),
        ContentMode::Casual => format!(
            "You help Muslims discover beautiful symbolism in the Quran and Sunnah. Write like \
             you're sharing an insight with a friend - \"SubhanAllah, look at what Allah is \
             teaching us here...\"\n\n\
             Reference Islamic imagery: light and darkness, gardens, water, paths, mountains, \
             the heart, veils, the straight path, etc.\n\n\
             IMPORTANT: Each symbol explanation should be 80-120 words.\n\n\
             {PLAIN_TEXT_GUARD}\n\n{personalization}"
        ),
    }
}

pub fn imagery_prompt(
    reference: &str,
    verse_text: &str,
    source: Option<&str>,
    mode: ContentMode,
) -> String {
    let (register, explanation_length) = match mode {
        ContentMode::Academic => (
            "Provide scholarly analysis of each symbol including Arabic linguistics, tafsir \
             references, and theological significance.",
            "100-150 words of scholarly analysis",
        ),
        ContentMode::Casual => (
            "Explain each symbol in a way that helps Muslims see deeper meaning and connect it \
             to their lives.",
            "80-120 words of heartfelt explanation",
        ),
    };
    let source_line = source
        .filter(|s| !s.is_empty())
        .map(|s| format!("(From: {s})\n"))
        .unwrap_or_default();

    format!(
        "Find 4 powerful symbols or themes in {reference}: \"{verse_text}\"\n{source_line}\n\
         {register}\n\n\
         IMPORTANT: Each \"sub\" field must be {explanation_length}. Don't give brief answers \
         - really explore each symbol.\n\n\
         Consider Islamic symbols like: light (nur), water, gardens (jannah), paths (sirat), \
         hearts (qalb), veils, mountains, the soul (nafs), mercy (rahma), etc.\n\n\
         Create 4 distinct visual concepts for image prompts (all respectful - no depictions \
         of Allah or prophets):\n\
         1. First image: Focus on a natural element (sky, water, garden, mountain)\n\
         2. Second image: Focus on Islamic art (geometric patterns, calligraphy, arabesque)\n\
         3. Third image: Focus on sacred architecture (mosque interior, mihrab, dome)\n\
         4. Fourth image: Focus on a scene that illustrates the verse\n\n\
         Return ONLY a JSON object, no markdown, no citations, no URLs:\n\
         {{\n\
           \"imagery\": [\n\
             {{ \"title\": \"Symbol Name\", \"sub\": \"{explanation_length} exploring this \
         symbol deeply\", \"icon\": \"auto_awesome\", \"image_prompt\": \"Detailed visual \
         description - respectful Islamic imagery\" }},\n\
             {{ \"title\": \"Symbol Name\", \"sub\": \"{explanation_length} exploring this \
         symbol deeply\", \"icon\": \"water_drop\", \"image_prompt\": \"Detailed visual \
         description\" }},\n\
             {{ \"title\": \"Symbol Name\", \"sub\": \"{explanation_length} exploring this \
         symbol deeply\", \"icon\": \"spa\", \"image_prompt\": \"Detailed visual \
         description\" }},\n\
             {{ \"title\": \"Symbol Name\", \"sub\": \"{explanation_length} exploring this \
         symbol deeply\", \"icon\": \"wb_sunny\", \"image_prompt\": \"Detailed visual \
         description\" }}\n\
           ]\n\
         }}"
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Chat
// ────────────────────────────────────────────────────────────────────────────

fn chat_tradition_guidance(tradition: Tradition) -> &'static str {
    match tradition {
        Tradition::Sunni => {
            "Ground answers in the Quran and sahih hadith. Reference mainstream scholars like \
             an-Nawawi, Ibn Kathir, and contemporary Sunni teachers when relevant."
        }
        Tradition::Shia => {
            "Be respectful of Shia tradition. Reference the Ahl al-Bayt and Shia scholarship \
             appropriately when relevant."
        }
        Tradition::Sufi => {
            "Include the inner dimensions of practice - dhikr, purification of the heart. \
             Reference teachers like al-Ghazali and Rumi when relevant."
        }
        Tradition::General => {
            "Use accessible language grounded in the Quran and authenticated Sunnah that all \
             Muslims accept. Avoid sectarian specifics."
        }
    }
}

pub fn chat_system(
    reference: &str,
    verse_text: &str,
    source: Option<&str>,
    tradition: Tradition,
) -> String {
    let source_line = source
        .filter(|s| !s.is_empty())
        .map(|s| format!("This teaching is from: {s}\n"))
        .unwrap_or_default();

    format!(
        "You are a helpful, knowledgeable companion helping someone explore Islamic teachings. \
         You are discussing: {reference} (\"{verse_text}\").\n{source_line}\n\
         {}\n\n\
         Guidelines:\n\
         - Keep responses concise (under 100 words) and conversational\n\
         - Ask open-ended questions to help the reader reflect and deepen understanding\n\
         - Be warm, encouraging, and supportive - like a wise friend from the masjid\n\
         - Reference the specific teaching when relevant\n\
         - Connect to daily worship and life application\n\
         - Feel free to reference related ayat, hadith, or scholars\n\
         - If they ask about other topics, gently guide back to the teaching at hand\n\
         - Never be preachy - meet people where they are\n\
         - Maintain Islamic adab; don't assume any particular level of practice\n\
         - NEVER invent quotes or attribute fake sayings to the Prophet (peace be upon him) \
         or to scholars",
        chat_tradition_guidance(tradition)
    )
}

/// One prior exchange in the chat history.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ChatTurn {
    pub sender: String,
    pub text: String,
}

/// How many history turns are replayed into the prompt.
const CHAT_HISTORY_WINDOW: usize = 6;

/// Builds the user prompt from windowed history plus the new message.
pub fn build_chat_prompt(history: &[ChatTurn], message: &str) -> String {
    let window_start = history.len().saturating_sub(CHAT_HISTORY_WINDOW);
    let conversation = history[window_start..]
        .iter()
        .map(|turn| format!("{}: {}", turn.sender, turn.text))
        .collect::<Vec<_>>()
        .join("\n");

    if conversation.is_empty() {
        format!("Reader: {message}\n\nRespond helpfully:")
    } else {
        format!(
            "Previous conversation:\n{conversation}\n\nReader: {message}\n\nRespond helpfully:"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_name_falls_back_to_english() {
        assert_eq!(language_name("ur"), "Urdu (اردو)");
        assert_eq!(language_name("xx"), "English");
        assert_eq!(language_name(""), "English");
    }

    #[test]
    fn test_language_instruction_absent_for_english() {
        assert!(language_instruction("en").is_none());
        assert!(language_instruction("").is_none());
        assert!(language_instruction("unknown-code").is_none());
    }

    #[test]
    fn test_language_instruction_names_target_language() {
        let instruction = language_instruction("tr").unwrap();
        assert!(instruction.contains("Turkish"));
        assert!(instruction.contains("delimiters stay in English"));
    }

    #[test]
    fn test_poem_style_deserializes_permissively() {
        let style: PoemStyle = serde_json::from_str(r#""classic""#).unwrap();
        assert_eq!(style, PoemStyle::Classic);
        let style: PoemStyle = serde_json::from_str(r#""free""#).unwrap();
        assert_eq!(style, PoemStyle::Free);
        let style: PoemStyle = serde_json::from_str(r#""sonnet""#).unwrap();
        assert_eq!(style, PoemStyle::Free);
    }

    #[test]
    fn test_story_kind_defaults_to_contemporary() {
        let kind: StoryKind = serde_json::from_str(r#""historical""#).unwrap();
        assert_eq!(kind, StoryKind::Historical);
        let kind: StoryKind = serde_json::from_str(r#""futuristic""#).unwrap();
        assert_eq!(kind, StoryKind::Contemporary);
    }

    #[test]
    fn test_interpretation_prompt_declares_delimiters() {
        let prompt = interpretation_prompt(
            "Al-Baqarah (2:286)",
            "Allah does not burden a soul beyond that it can bear",
            Some("Quran"),
            ContentMode::Casual,
            "en",
        );
        assert!(prompt.contains("INTERPRETATION===\n"));
        assert!(prompt.contains("===INTERPRETATION"));
        assert!(prompt.contains("IMAGE_PROMPT===\n"));
        assert!(prompt.contains("350-450 words"));
        assert!(!prompt.contains("REMINDER: Write your interpretation"));
    }

    #[test]
    fn test_interpretation_prompt_reminds_about_language() {
        let prompt = interpretation_prompt("ref", "text", None, ContentMode::Casual, "ar");
        assert!(prompt.contains("REMINDER"));
        assert!(prompt.contains("Arabic"));
    }

    #[test]
    fn test_academic_interpretation_requests_more_words() {
        assert!(interpretation_word_limit(ContentMode::Academic).contains("500-700"));
        assert!(interpretation_word_limit(ContentMode::Casual).contains("350-450"));
    }

    #[test]
    fn test_interpretation_system_ends_with_personalization() {
        let casual = interpretation_system(ContentMode::Casual, "en", "CTX");
        let academic = interpretation_system(ContentMode::Academic, "en", "CTX");
        assert!(casual.contains("devotional content"));
        assert!(academic.contains("Islamic studies scholar"));
        assert!(casual.ends_with("CTX"));
        assert!(academic.ends_with("CTX"));
    }

    #[test]
    fn test_poem_prompt_varies_by_style() {
        let classic = poem_prompt("r", "t", None, ContentMode::Casual, PoemStyle::Classic);
        let free = poem_prompt("r", "t", None, ContentMode::Casual, PoemStyle::Free);
        assert!(classic.contains("NASHEED-STYLE"));
        assert!(free.contains("FREE VERSE"));
        assert!(classic.contains("TITLE===Your Poem Title===TITLE"));
    }

    #[test]
    fn test_poetry_prompt_declares_type_field() {
        let prompt = poetry_prompt("r", "t", PoemStyle::Classic);
        assert!(prompt.contains("TYPE===Nasheed Style===TYPE"));
        let prompt = poetry_prompt("r", "t", PoemStyle::Free);
        assert!(prompt.contains("TYPE===Free Verse===TYPE"));
    }

    #[test]
    fn test_stories_system_declares_all_six_delimiters() {
        let system = stories_system(AgeRange::Teen, Tradition::General, "en");
        for field in [
            "STORY_1_TITLE===",
            "===STORY_1_TITLE",
            "STORY_1_TEXT===",
            "STORY_1_IMAGE===",
            "STORY_2_TITLE===",
            "STORY_2_TEXT===",
            "STORY_2_IMAGE===",
        ] {
            assert!(system.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_teen_story_guidance_forbids_careers() {
        let guidance = age_story_guidance(AgeRange::Teen);
        assert!(guidance.contains("MUST NEVER"));
        assert!(guidance.contains("ages 14-18"));
        assert!(age_story_guidance(AgeRange::Unspecified).contains("age-appropriate"));
    }

    #[test]
    fn test_context_source_guidance_detects_families() {
        let quran =
            context_source_guidance("Al-Baqarah (2:255)", Some("Quran"), ContentMode::Casual);
        assert!(quran.contains("from the Quran"));
        let hadith = context_source_guidance("Sahih Bukhari 1", None, ContentMode::Casual);
        assert!(hadith.contains("hadith"));
        let sufi = context_source_guidance("Rumi, Masnavi", None, ContentMode::Casual);
        assert!(sufi.contains("Sufi"));
        let unknown = context_source_guidance("Unknown source", None, ContentMode::Casual);
        assert!(unknown.contains("historical background"));
    }

    #[test]
    fn test_context_prompt_requests_snake_case_json_fields() {
        let prompt = context_prompt("r", "t", None, ContentMode::Casual);
        for field in [
            "who_is_speaking",
            "original_listeners",
            "why_the_conversation",
            "historical_backdrop",
            "immediate_impact",
            "long_term_impact",
            "setting",
            "context_image_prompt",
        ] {
            assert!(prompt.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_imagery_prompt_requests_four_entries() {
        let prompt = imagery_prompt("r", "t", None, ContentMode::Casual);
        assert_eq!(prompt.matches("\"image_prompt\"").count(), 4);
        assert!(prompt.contains("\"imagery\""));
    }

    #[test]
    fn test_chat_prompt_windows_history_to_last_six() {
        let history: Vec<ChatTurn> = (0..10)
            .map(|i| ChatTurn {
                sender: "Reader".to_string(),
                text: format!("message {i}"),
            })
            .collect();
        let prompt = build_chat_prompt(&history, "latest question");
        assert!(!prompt.contains("message 3"));
        assert!(prompt.contains("message 4"));
        assert!(prompt.contains("message 9"));
        assert!(prompt.contains("latest question"));
    }

    #[test]
    fn test_chat_prompt_without_history_has_no_preamble() {
        let prompt = build_chat_prompt(&[], "first question");
        assert!(!prompt.contains("Previous conversation"));
        assert!(prompt.starts_with("Reader: first question"));
    }

    #[test]
    fn test_chat_system_embeds_verse_and_tradition() {
        let system = chat_system(
            "Al-Fatiha (1:5)",
            "You alone we worship",
            None,
            Tradition::Sufi,
        );
        assert!(system.contains("Al-Fatiha (1:5)"));
        assert!(system.contains("al-Ghazali"));
    }
}
