//! Unit tests for the entity model

#[cfg(test)]
mod tests {
    use crate::model::{Tag, TaggedFile, Tagging, TaggingKey, UNASSIGNED_ID};
    use std::collections::BTreeSet;

    #[test]
    fn test_new_file_is_unpersisted() {
        let file = TaggedFile::new("/a/b.txt");
        assert_eq!(file.id, UNASSIGNED_ID);
        assert!(!file.is_persisted());
        assert!(TaggedFile::with_id(0, "/a/b.txt").is_persisted());
    }

    #[test]
    fn test_file_ordering_by_id_then_path() {
        let files: BTreeSet<_> = [
            TaggedFile::with_id(3, "/a"),
            TaggedFile::with_id(1, "/z"),
            TaggedFile::with_id(1, "/b"),
        ]
        .into_iter()
        .collect();

        let order: Vec<_> = files.iter().map(|f| (f.id, f.path.clone())).collect();
        assert_eq!(order[0], (1, "/b".into()));
        assert_eq!(order[1], (1, "/z".into()));
        assert_eq!(order[2], (3, "/a".into()));
    }

    #[test]
    fn test_tag_from_nullable() {
        assert_eq!(Tag::from_nullable(None).text, "");
        assert_eq!(Tag::from_nullable(Some("work".into())), Tag::new("work"));
    }

    #[test]
    fn test_tag_ordering_is_lexical() {
        let tags: Vec<_> = ["work", "alpha", "music"]
            .into_iter()
            .map(Tag::from)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(tags, vec!["alpha", "music", "work"]);
    }

    #[test]
    fn test_tagging_ordering_persisted_first() {
        let mut stored_late = Tagging::new(1, "aaa");
        stored_late.id = 9;
        let mut stored_early = Tagging::new(1, "zzz");
        stored_early.id = 2;
        let pending_b = Tagging::new(1, "bbb");
        let pending_a = Tagging::new(1, "abc");

        let set: BTreeSet<_> = [pending_b, stored_late, pending_a, stored_early]
            .into_iter()
            .collect();
        let tags: Vec<_> = set.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["zzz", "aaa", "abc", "bbb"]);
    }

    #[test]
    fn test_tagging_equality_ignores_comment() {
        let plain = Tagging::new(4, "work");
        let commented = Tagging::new(4, "work").with_comment("draft");
        assert_eq!(plain, commented);
    }

    #[test]
    fn test_tagging_equality_includes_surrogate_id() {
        let pending = Tagging::new(4, "work");
        let mut stored = pending.clone();
        stored.id = 12;
        assert_ne!(pending, stored);
        assert_eq!(pending.key(), stored.key());
        assert_eq!(stored.unassigned(), pending);
    }

    #[test]
    fn test_tagging_negative_ids_are_all_unassigned() {
        let mut a = Tagging::new(4, "work");
        a.id = -7;
        assert_eq!(a, Tagging::new(4, "work"));
    }

    #[test]
    fn test_tagging_key() {
        let key = Tagging::new(3, "music").key();
        assert_eq!(key, TaggingKey::new(3, "music"));
    }
}
