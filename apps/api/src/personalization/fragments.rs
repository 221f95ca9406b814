//! Fragment lookup tables and the context builder.
//!
//! Fragment order is fixed: base framing → tradition → age → gender →
//! situation. Later fragments build stylistically on earlier ones, so the
//! order must not change. Empty fragments are omitted, never emitted as
//! blank lines.

use crate::personalization::{AgeRange, ContentMode, Gender, ReaderProfile, Tradition};

/// Base framing for casual (devotional) mode.
const CASUAL_BASE: &str = "This reflection is for a Muslim reader. Use Islamic terminology \
    naturally - Allah, Prophet (peace be upon him), Quran, Sunnah, dua, taqwa, etc. - but \
    briefly explain less common terms. Don't over-explain basics. Maintain Islamic adab \
    (etiquette) in tone.";

/// Base framing for academic (scholarly) mode.
const ACADEMIC_BASE: &str = "This analysis is for a Muslim seeking scholarly, research-based \
    content. Assume familiarity with Islamic terminology and concepts. Provide academic depth \
    with proper citations and Arabic terms.";

/// Scholarly apparatus appended after the academic base framing.
const ACADEMIC_APPARATUS: &str = "ACADEMIC/RESEARCH MODE INSTRUCTIONS:
Write as an Islamic studies scholar with expertise in Quranic sciences and Islamic history. Your analysis should include:

LINGUISTIC ANALYSIS:
- Arabic word studies with roots and morphology
- Balagha (Quranic rhetoric) where relevant
- Variant qira'at (readings) if significant

TAFSIR SOURCES:
- Classical mufassirun: Ibn Kathir, al-Tabari, al-Qurtubi, al-Razi
- Modern scholars: Sayyid Qutb, Maududi, contemporary academics
- Reference specific tafsir works

HADITH SCIENCES:
- Include relevant hadith with source (Bukhari, Muslim, etc.)
- Note chain strength where relevant
- Cross-reference with Quranic themes

HISTORICAL-CRITICAL CONTEXT:
- Asbab al-nuzul (occasions of revelation)
- Makki vs Madani classification
- Historical situation of early Islam
- Academic scholarship (both Muslim and Western)

FIQH CONNECTIONS:
- How different madhabs interpret practical implications
- Usul al-fiqh principles where relevant

TONE: Scholarly but accessible. Faith-rooted with academic rigor. Cite sources naturally within text.";

/// Tradition guidance. `General` is the fallback for every unrecognized value.
pub fn tradition_fragment(tradition: Tradition) -> &'static str {
    match tradition {
        Tradition::Sunni => {
            "Follow mainstream Sunni Islamic scholarship. Reference the four madhabs where \
             relevant. Use hadith from Bukhari, Muslim, and other sahih collections. Cite \
             classical scholars like Ibn Taymiyyah, al-Ghazali, and an-Nawawi."
        }
        Tradition::Shia => {
            "Be respectful of Shia Islamic tradition. Reference the Ahl al-Bayt appropriately. \
             Include hadith from Shia collections. Acknowledge the Imams where relevant. Be \
             inclusive while maintaining Islamic authenticity."
        }
        Tradition::Sufi => {
            "Include Sufi/tasawwuf perspectives where appropriate. Reference great Sufi \
             masters - Rumi, Ibn Arabi, al-Ghazali, Rabia al-Adawiyya. Connect to themes of \
             the heart, dhikr, and the inner dimensions of Islam. Balance tariqa with shariah."
        }
        Tradition::General => {
            "Write for Muslims of all backgrounds. Focus on shared Islamic values and sources. \
             Avoid sectarian specifics. Emphasize the Quran and authenticated Sunnah that all \
             Muslims accept."
        }
    }
}

/// Age guidance, selected per content mode. The two tables are disjoint:
/// academic fragments request scholarly depth, casual fragments plain warmth.
pub fn age_fragment(age: AgeRange, mode: ContentMode) -> &'static str {
    match mode {
        ContentMode::Academic => academic_age_fragment(age),
        ContentMode::Casual => casual_age_fragment(age),
    }
}

fn casual_age_fragment(age: AgeRange) -> &'static str {
    match age {
        AgeRange::Child => {
            "Write for a Muslim child (ages 6-12). Use simple Arabic terms with explanations. \
             Reference stories they'd know - Prophet Muhammad (peace be upon him), Prophet \
             Ibrahim, Prophet Yusuf. Make the Quran come alive with wonder. Connect to their \
             world - family, school, friends, Ramadan."
        }
        AgeRange::Teen => {
            "Write for a Muslim teenager. They're developing their own relationship with Islam. \
             Address real questions about faith, identity, fitting in while being Muslim. \
             Reference relatable challenges. Be authentic, not preachy. They can handle \
             complexity."
        }
        AgeRange::Youth => {
            "Write for a young Muslim adult (18-30). They may be in college, starting careers, \
             navigating marriage and family. Some are deeply practicing, others exploring. \
             Address real-world application of Islamic wisdom. Be intellectually engaging. They \
             appreciate depth and authenticity."
        }
        AgeRange::Adult => {
            "Write for Muslim adults navigating career, family, and community. They juggle \
             obligations - work, children, aging parents, community involvement. Address \
             practical wisdom for daily life. They want substance that respects their \
             intelligence and time."
        }
        AgeRange::Senior => {
            "Write for senior Muslims with a lifetime of experience. They've seen much, made \
             Hajj, raised families, experienced loss. Honor their wisdom while offering fresh \
             perspectives. Address legacy, meaning, and preparation for the Hereafter. They \
             appreciate depth and don't need things oversimplified."
        }
        AgeRange::Unspecified => {
            "Write for a general Muslim audience seeking meaningful connection with the Quran \
             and Sunnah."
        }
    }
}

fn academic_age_fragment(age: AgeRange) -> &'static str {
    match age {
        AgeRange::Child => {
            "Write for a Muslim child with age-appropriate scholarly context. Introduce Arabic \
             terms properly. Explain historical background simply but accurately."
        }
        AgeRange::Teen => {
            "Write for a Muslim teenager with emerging intellectual curiosity. Include tafsir \
             basics, introduce different schools of thought, explain Arabic terminology. \
             Islamic school level."
        }
        AgeRange::Youth => {
            "Write for educated young Muslim adults. Include detailed Quranic analysis, \
             classical tafsir references (Ibn Kathir, al-Tabari, al-Qurtubi), hadith sciences, \
             usul al-fiqh concepts. University Islamic studies level."
        }
        AgeRange::Adult => {
            "Write for intellectually engaged Muslim adults. Provide comprehensive scholarly \
             analysis - classical and modern mufassirun, hadith criticism, fiqh comparisons \
             across madhabs, linguistic analysis of Quranic Arabic."
        }
        AgeRange::Senior => {
            "Write for scholarly senior Muslims. Full academic depth - Arabic linguistic \
             analysis, comprehensive tafsir, hadith chains, scholarly debates, Sufi \
             interpretations where relevant, modern academic scholarship."
        }
        AgeRange::Unspecified => {
            "Write with full scholarly apparatus - tafsir sources, hadith sciences, linguistic \
             analysis, historical context."
        }
    }
}

/// Gender note. Only male/female produce a fragment.
pub fn gender_fragment(gender: Gender) -> Option<&'static str> {
    match gender {
        Gender::Male => Some("The reader is a Muslim man (brother)."),
        Gender::Female => Some("The reader is a Muslim woman (sister)."),
        Gender::Other | Gender::Unspecified => None,
    }
}

/// Situation guidance, keyed by the fixed option-set labels.
/// Unknown labels and "Nothing special" produce no fragment.
pub fn situation_fragment(label: &str) -> Option<&'static str> {
    let fragment = match label {
        "New Muslim / Convert" => {
            "The reader is a new Muslim or recent convert (revert). Welcome them warmly. \
             Explain Islamic concepts without assuming prior knowledge. Connect to the beauty \
             of finding Islam. Honor their journey."
        }
        "Preparing for Hajj" => {
            "The reader is preparing for Hajj. Connect to themes of pilgrimage, purification, \
             unity of the ummah, and the footsteps of Prophet Ibrahim. Include practical \
             spiritual preparation."
        }
        "Ramadan preparation" => {
            "The reader is preparing for or observing Ramadan. Connect to themes of fasting, \
             taqwa, the revelation of the Quran, and spiritual renewal."
        }
        "Marriage preparation" => {
            "The reader is preparing for Islamic marriage (nikah). Connect to themes of \
             partnership, building a Muslim household, rights and responsibilities, and mercy \
             between spouses."
        }
        "New parent" => {
            "The reader is a new Muslim parent. Connect to themes of raising righteous \
             children, the trust (amanah) of parenthood, teaching Islam to the next generation."
        }
        "Seeking knowledge" => {
            "The reader is on a path of seeking Islamic knowledge. Connect to themes of 'ilm, \
             the duty to learn, finding good teachers, and applying knowledge."
        }
        "Grief and loss" => {
            "The reader is grieving. Approach with deep compassion. Connect to themes of qadr \
             (divine decree), patience (sabr), the temporary nature of dunya, and hope in the \
             Hereafter."
        }
        "Health challenges" => {
            "The reader faces health challenges. Connect to themes of shifa (healing), \
             trusting in Allah's plan, patience in difficulty, and the reward for those who \
             endure."
        }
        "Career decisions" => {
            "The reader is navigating career decisions. Connect to themes of halal \
             livelihood, rizq (provision from Allah), balancing dunya and akhirah, and \
             excellence (ihsan) in work."
        }
        "Strengthening iman" => {
            "The reader wants to strengthen their iman (faith). Connect to themes of heart \
             softeners, remembrance of Allah, increasing worship, and spiritual growth."
        }
        "Family difficulties" => {
            "The reader is experiencing family difficulties. Connect to themes of maintaining \
             family ties, patience, forgiveness, and seeking Allah's help in hardship."
        }
        _ => return None,
    };
    Some(fragment)
}

/// Assembles the full personalization context for a reader profile.
///
/// Always returns a non-empty string: the base framing is unconditional and
/// every lookup resolves through a closed enum. Fragments are joined by blank
/// lines in fixed order.
pub fn build_personalization_context(profile: &ReaderProfile) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(6);

    match profile.content_mode {
        ContentMode::Academic => {
            parts.push(ACADEMIC_BASE);
            parts.push(ACADEMIC_APPARATUS);
        }
        ContentMode::Casual => parts.push(CASUAL_BASE),
    }

    parts.push(tradition_fragment(profile.tradition));
    parts.push(age_fragment(profile.age_range, profile.content_mode));

    if let Some(gender) = gender_fragment(profile.gender) {
        parts.push(gender);
    }
    if let Some(situation) = situation_fragment(&profile.stage_situation) {
        parts.push(situation);
    }

    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_never_empty() {
        let context = build_personalization_context(&ReaderProfile::default());
        assert!(!context.is_empty());
        assert!(context.contains("general Muslim audience"));
    }

    #[test]
    fn test_fragment_order_is_base_tradition_age() {
        let profile = ReaderProfile {
            age_range: AgeRange::Adult,
            tradition: Tradition::Sunni,
            ..ReaderProfile::default()
        };
        let context = build_personalization_context(&profile);
        let base_pos = context.find("This reflection is for a Muslim reader").unwrap();
        let tradition_pos = context.find("mainstream Sunni Islamic scholarship").unwrap();
        let age_pos = context.find("navigating career, family, and community").unwrap();
        assert!(base_pos < tradition_pos);
        assert!(tradition_pos < age_pos);
    }

    #[test]
    fn test_teen_profile_with_no_gender_omits_gender_fragment() {
        let profile = ReaderProfile {
            age_range: AgeRange::Teen,
            gender: Gender::Unspecified,
            stage_situation: "Nothing special".to_string(),
            content_mode: ContentMode::Casual,
            tradition: Tradition::General,
        };
        let context = build_personalization_context(&profile);
        assert!(context.contains("Muslim teenager"));
        assert!(context.contains("Muslims of all backgrounds"));
        assert!(!context.contains("The reader is a Muslim man"));
        assert!(!context.contains("The reader is a Muslim woman"));
        // Omitted fragments never leave blank lines behind
        assert!(!context.contains("\n\n\n"));
    }

    #[test]
    fn test_academic_mode_includes_scholarly_apparatus() {
        let profile = ReaderProfile {
            content_mode: ContentMode::Academic,
            ..ReaderProfile::default()
        };
        let context = build_personalization_context(&profile);
        assert!(context.contains("ACADEMIC/RESEARCH MODE INSTRUCTIONS"));
        assert!(context.contains("TAFSIR SOURCES"));
    }

    #[test]
    fn test_academic_fragments_are_longer_than_casual() {
        let casual = build_personalization_context(&ReaderProfile::default());
        let academic = build_personalization_context(&ReaderProfile {
            content_mode: ContentMode::Academic,
            ..ReaderProfile::default()
        });
        assert!(academic.len() > casual.len());
    }

    #[test]
    fn test_known_situation_produces_fragment() {
        let profile = ReaderProfile {
            stage_situation: "Grief and loss".to_string(),
            ..ReaderProfile::default()
        };
        let context = build_personalization_context(&profile);
        assert!(context.contains("qadr (divine decree)"));
    }

    #[test]
    fn test_nothing_special_and_unknown_situations_are_omitted() {
        assert!(situation_fragment("Nothing special").is_none());
        assert!(situation_fragment("Winning the lottery").is_none());
        assert!(situation_fragment("").is_none());
    }

    #[test]
    fn test_every_tradition_has_a_distinct_fragment() {
        let fragments = [
            tradition_fragment(Tradition::Sunni),
            tradition_fragment(Tradition::Shia),
            tradition_fragment(Tradition::Sufi),
            tradition_fragment(Tradition::General),
        ];
        for (i, a) in fragments.iter().enumerate() {
            assert!(!a.is_empty());
            for b in fragments.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_gender_fragments() {
        assert!(gender_fragment(Gender::Male).unwrap().contains("brother"));
        assert!(gender_fragment(Gender::Female).unwrap().contains("sister"));
        assert!(gender_fragment(Gender::Other).is_none());
        assert!(gender_fragment(Gender::Unspecified).is_none());
    }

    #[test]
    fn test_academic_age_table_is_disjoint_from_casual() {
        for age in [
            AgeRange::Child,
            AgeRange::Teen,
            AgeRange::Youth,
            AgeRange::Adult,
            AgeRange::Senior,
            AgeRange::Unspecified,
        ] {
            assert_ne!(
                age_fragment(age, ContentMode::Casual),
                age_fragment(age, ContentMode::Academic)
            );
        }
    }
}
