//! # Content Model
//!
//! The fixed Psalm 139 corpus, grouped into themed sections.
//!
//! Everything here is `'static` and never mutated. Display order is the
//! order of the slices.

use std::fmt;

use log::warn;

/// One addressable line of scripture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verse {
    /// `chapter:verse`, unique within the corpus (e.g. `"139:5"`).
    pub reference: &'static str,
    pub text: &'static str,
}

/// A themed, ordered group of verses displayed together.
#[derive(Debug, Clone, Copy)]
pub struct VerseSection {
    pub theme: &'static str,
    pub verses: &'static [Verse],
}

/// A verse reference without the `chapter:verse` separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedContent {
    pub reference: String,
}

impl fmt::Display for MalformedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed verse reference (missing ':'): {:?}", self.reference)
    }
}

impl std::error::Error for MalformedContent {}

impl Verse {
    /// The part of the reference after `:`, e.g. `"5"` for `"139:5"`.
    pub fn sub_reference(&self) -> Result<&'static str, MalformedContent> {
        self.reference
            .split(':')
            .nth(1)
            .ok_or_else(|| MalformedContent {
                reference: self.reference.to_string(),
            })
    }

    /// Label shown in front of the verse text. Falls back to the raw
    /// reference when it has no separator.
    pub fn display_label(&self) -> &'static str {
        match self.sub_reference() {
            Ok(sub) => sub,
            Err(e) => {
                warn!("{e}");
                self.reference
            }
        }
    }

    /// Text placed on the clipboard by the copy action.
    pub fn clipboard_text(&self) -> String {
        format!("詩篇 {} - {}", self.reference, self.text)
    }
}

pub const TITLE: &str = "詩篇 139";
pub const SUBTITLE: &str = "一場關於神的同在、大能和對你獨特創造的默想之旅。";

pub static PSALM_139: &[VerseSection] = &[
    VerseSection {
        theme: "神的全知：祂認識我",
        verses: &[
            Verse { reference: "139:1", text: "耶和華啊，你已經鑒察我，認識我。" },
            Verse { reference: "139:2", text: "我坐下，我起來，你都曉得；你從遠處知道我的意念。" },
            Verse { reference: "139:3", text: "我行路，我躺臥，你都細察；你也深知我一切所行的。" },
            Verse { reference: "139:4", text: "耶和華啊，我舌頭上的話，你沒有一句不知道的。" },
            Verse { reference: "139:5", text: "你在我前後環繞我，按手在我身上。" },
            Verse { reference: "139:6", text: "這樣的知識奇妙，是我不能測的，至高，是我不能及的。" },
        ],
    },
    VerseSection {
        theme: "神的全在：祂無處不在",
        verses: &[
            Verse { reference: "139:7", text: "我往哪裏去躲避你的靈？我往哪裏去逃、躲避你的面？" },
            Verse { reference: "139:8", text: "我若升到天上，你在那裏；我若在陰間下榻，你也在那裏。" },
            Verse { reference: "139:9", text: "我若展開清晨的翅膀，飛到海極居住，" },
            Verse { reference: "139:10", text: "就是在那裏，你的手必引導我；你的右手也必扶持我。" },
            Verse { reference: "139:11", text: "我若說：黑暗必定遮蔽我，我周圍的亮光必成為黑夜；" },
            Verse { reference: "139:12", text: "黑暗也不能遮蔽我，使你不見，黑夜卻如白晝發亮。黑暗和光明，在你看都是一樣。" },
        ],
    },
    VerseSection {
        theme: "神的創造：祂塑造我",
        verses: &[
            Verse { reference: "139:13", text: "我的肺腑是你所造的；我在母腹中，你已覆庇我。" },
            Verse { reference: "139:14", text: "我要稱謝你，因我受造，奇妙可畏；你的作為奇妙，這是我心深知道的。" },
            Verse { reference: "139:15", text: "我在暗中受造，在地的深處被聯絡；那時，我的形體並不向你隱藏。" },
            Verse { reference: "139:16", text: "我未成形的體質，你的眼早已看見了；你所定的日子，我尚未度一日，你都寫在你的冊上了。" },
        ],
    },
    VerseSection {
        theme: "神的意念：祂珍視我",
        verses: &[
            Verse { reference: "139:17", text: "神啊，你的意念向我何等寶貴！其數何等眾多！" },
            Verse { reference: "139:18", text: "我若數點，比海沙更多；我睡醒的時候，仍和你同在。" },
        ],
    },
    VerseSection {
        theme: "正直的禱告：引導我",
        verses: &[
            Verse { reference: "139:19", text: "神啊，你必要殺戮惡人；所以，你們好流人血的，離開我去吧！" },
            Verse { reference: "139:20", text: "因為他們說惡言頂撞你；你的仇敵也妄稱你的名。" },
            Verse { reference: "139:21", text: "耶和華啊，恨惡你的，我豈不恨惡他們嗎？攻擊你的，我豈不憎嫌他們嗎？" },
            Verse { reference: "139:22", text: "我切切地恨惡他們，以他們為仇敵。" },
            Verse { reference: "139:23", text: "神啊，求你鑒察我，知道我的心思，試煉我，知道我的意念，" },
            Verse { reference: "139:24", text: "看在我裏面有甚麼惡行沒有，引導我走永生的道路。" },
        ],
    },
];

/// All verses in display order, flattened across sections.
pub fn all_verses() -> impl Iterator<Item = &'static Verse> {
    PSALM_139.iter().flat_map(|section| section.verses.iter())
}

/// Number of verses in the corpus.
pub fn verse_count() -> usize {
    PSALM_139.iter().map(|section| section.verses.len()).sum()
}
