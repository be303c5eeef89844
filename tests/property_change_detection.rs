// tests/property_change_detection.rs

use std::path::Path;
use std::time::{Duration, UNIX_EPOCH};

use proptest::prelude::*;

use fwatch::exec::split_words;
use fwatch::watch::MtimeTable;

proptest! {
    // For any sequence of observed times, a change is reported exactly when
    // the time exceeds every earlier observation (or on the first one).
    #[test]
    fn changes_track_the_running_maximum(times in proptest::collection::vec(0u64..1_000, 1..40)) {
        let mut table = MtimeTable::new();
        let path = Path::new("/watched/file");
        let mut max: Option<u64> = None;

        for t in times {
            let changed = table.observe(path, UNIX_EPOCH + Duration::from_secs(t));
            let expected = max.is_none_or(|m| t > m);
            prop_assert_eq!(changed, expected);
            if expected {
                max = Some(t);
            }
            prop_assert_eq!(
                table.last_seen(path),
                max.map(|m| UNIX_EPOCH + Duration::from_secs(m))
            );
        }
    }

    // Plain words separated by arbitrary runs of spaces split back into the
    // same words.
    #[test]
    fn plain_words_split_on_whitespace(
        words in proptest::collection::vec("[a-zA-Z0-9_./=-]{1,12}", 1..8),
        gaps in proptest::collection::vec(1usize..4, 8),
    ) {
        let mut line = String::new();
        for (i, w) in words.iter().enumerate() {
            line.push_str(&" ".repeat(gaps[i]));
            line.push_str(w);
        }

        prop_assert_eq!(split_words(&line).unwrap(), words);
    }

    // Inside single quotes, spaces and shell metacharacters stay literal.
    #[test]
    fn single_quoted_text_is_one_word(text in r#"[a-z0-9 "\\$|&;<>*?(){}-]{0,30}"#) {
        let line = format!("cmd '{text}'");
        prop_assert_eq!(split_words(&line).unwrap(), vec!["cmd".to_string(), text]);
    }
}
