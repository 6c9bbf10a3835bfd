/// Usage templates, echoed back on token underflow.
pub const USAGE_ADD_VOCAB: &str = "!add vocab <category> <vocab:meaning>";
pub const USAGE_DELETE_VOCAB: &str = "!delete vocab <category> <word>";
pub const USAGE_DELETE_CATEGORY: &str = "!delete category <category>";
pub const USAGE_LIST_VOCAB: &str = "!list vocab <category>";
pub const USAGE_EDIT_VOCAB: &str = "!edit vocab <category> <word> <newMeaning>";
pub const USAGE_PLAY: &str = "!play <category>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Link,
    TestStore,
    AddVocab { category: String, pairs: Vec<String> },
    DeleteVocab { category: String, word: String },
    DeleteCategory { category: String },
    ListCategories,
    ListVocab { category: String },
    EditVocab { category: String, word: String, new_meaning: String },
    Play { category: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Command(Command),
    /// Recognized command keyword but too few tokens; carries the usage
    /// template to echo back.
    Usage(&'static str),
    /// Not a command at all. Produces no reply.
    Unrecognized,
}

/// Pure tokenizer: trimmed text in, command out. Splits on runs of
/// whitespace; keywords are case-sensitive. Never touches the store.
pub fn parse(text: &str) -> Parsed {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    // Exact-shape commands first, mirroring the fixed-string matches
    match tokens.as_slice() {
        ["!help"] => return Parsed::Command(Command::Help),
        ["!link"] => return Parsed::Command(Command::Link),
        ["!testfirebase"] => return Parsed::Command(Command::TestStore),
        ["!list", "categories"] => return Parsed::Command(Command::ListCategories),
        _ => {}
    }

    match (tokens.first().copied(), tokens.get(1).copied()) {
        (Some("!add"), Some("vocab")) => {
            if tokens.len() < 4 {
                return Parsed::Usage(USAGE_ADD_VOCAB);
            }
            Parsed::Command(Command::AddVocab {
                category: tokens[2].to_string(),
                pairs: tokens[3..].iter().map(|t| t.to_string()).collect(),
            })
        }
        (Some("!delete"), Some("vocab")) => {
            if tokens.len() < 4 {
                return Parsed::Usage(USAGE_DELETE_VOCAB);
            }
            Parsed::Command(Command::DeleteVocab {
                category: tokens[2].to_string(),
                word: tokens[3].to_string(),
            })
        }
        (Some("!delete"), Some("category")) => {
            if tokens.len() < 3 {
                return Parsed::Usage(USAGE_DELETE_CATEGORY);
            }
            Parsed::Command(Command::DeleteCategory { category: tokens[2].to_string() })
        }
        (Some("!list"), Some("vocab")) => {
            if tokens.len() < 3 {
                return Parsed::Usage(USAGE_LIST_VOCAB);
            }
            Parsed::Command(Command::ListVocab { category: tokens[2].to_string() })
        }
        (Some("!edit"), Some("vocab")) => {
            if tokens.len() < 5 {
                return Parsed::Usage(USAGE_EDIT_VOCAB);
            }
            Parsed::Command(Command::EditVocab {
                category: tokens[2].to_string(),
                word: tokens[3].to_string(),
                // Remaining tokens rejoined with single spaces
                new_meaning: tokens[4..].join(" "),
            })
        }
        (Some("!play"), _) => {
            if tokens.len() < 2 {
                return Parsed::Usage(USAGE_PLAY);
            }
            Parsed::Command(Command::Play { category: tokens[1].to_string() })
        }
        _ => Parsed::Unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_commands() {
        assert_eq!(parse("!help"), Parsed::Command(Command::Help));
        assert_eq!(parse("!link"), Parsed::Command(Command::Link));
        assert_eq!(parse("!testfirebase"), Parsed::Command(Command::TestStore));
        assert_eq!(parse("!list categories"), Parsed::Command(Command::ListCategories));
    }

    #[test]
    fn exact_commands_reject_trailing_tokens() {
        assert_eq!(parse("!help me"), Parsed::Unrecognized);
        assert_eq!(parse("!list categories now"), Parsed::Unrecognized);
    }

    #[test]
    fn add_vocab_extracts_category_and_pairs() {
        let parsed = parse("!add vocab animals dog:hund cat:katze");
        assert_eq!(
            parsed,
            Parsed::Command(Command::AddVocab {
                category: "animals".to_string(),
                pairs: vec!["dog:hund".to_string(), "cat:katze".to_string()],
            })
        );
    }

    #[test]
    fn add_vocab_underflow_is_usage_not_unrecognized() {
        assert_eq!(parse("!add vocab"), Parsed::Usage(USAGE_ADD_VOCAB));
        assert_eq!(parse("!add vocab animals"), Parsed::Usage(USAGE_ADD_VOCAB));
    }

    #[test]
    fn delete_shapes() {
        assert_eq!(
            parse("!delete vocab animals dog"),
            Parsed::Command(Command::DeleteVocab {
                category: "animals".to_string(),
                word: "dog".to_string(),
            })
        );
        assert_eq!(
            parse("!delete category animals"),
            Parsed::Command(Command::DeleteCategory { category: "animals".to_string() })
        );
        assert_eq!(parse("!delete vocab animals"), Parsed::Usage(USAGE_DELETE_VOCAB));
        assert_eq!(parse("!delete category"), Parsed::Usage(USAGE_DELETE_CATEGORY));
        assert_eq!(parse("!delete"), Parsed::Unrecognized);
    }

    #[test]
    fn edit_vocab_rejoins_meaning_with_single_spaces() {
        let parsed = parse("!edit vocab animals dog   a  loyal   pet");
        assert_eq!(
            parsed,
            Parsed::Command(Command::EditVocab {
                category: "animals".to_string(),
                word: "dog".to_string(),
                new_meaning: "a loyal pet".to_string(),
            })
        );
    }

    #[test]
    fn edit_vocab_underflow() {
        assert_eq!(parse("!edit vocab animals dog"), Parsed::Usage(USAGE_EDIT_VOCAB));
    }

    #[test]
    fn play_takes_one_category() {
        assert_eq!(
            parse("!play animals"),
            Parsed::Command(Command::Play { category: "animals".to_string() })
        );
        assert_eq!(parse("!play"), Parsed::Usage(USAGE_PLAY));
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(parse("!HELP"), Parsed::Unrecognized);
        assert_eq!(parse("!Add vocab animals dog:hund"), Parsed::Unrecognized);
    }

    #[test]
    fn plain_chatter_is_unrecognized() {
        assert_eq!(parse("hello there"), Parsed::Unrecognized);
        assert_eq!(parse(""), Parsed::Unrecognized);
    }

    #[test]
    fn whitespace_runs_are_collapsed() {
        let parsed = parse("  !add   vocab  animals   dog:hund ");
        assert!(matches!(parsed, Parsed::Command(Command::AddVocab { .. })));
    }
}
