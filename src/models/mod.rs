pub mod element;
pub mod title_entry;
pub mod outline_element;
pub mod character_info;
pub mod conf;
pub mod script;

pub use element::{ElementType, FountainElement};
pub use title_entry::{normalize_key, title_values, TitlePageEntry};
pub use outline_element::OutlineElement;
pub use character_info::{CharacterCounts, CharacterGender, CharacterInfo, CharacterList};
pub use conf::Conf;
pub use script::FountainScript;
