use qa_capture::{
    ItemPath, ItemType, Questionnaire, QuestionnaireItem, QuestionnaireResponse, ViewItem,
    flatten, reconcile,
};

fn basic_questions() -> Questionnaire {
    Questionnaire::new("a-questionnaire").with_item(
        QuestionnaireItem::new("a-link-id", ItemType::Group)
            .with_text("Basic questions")
            .with_item(
                QuestionnaireItem::new("another-link-id", ItemType::String).with_text("Name?"),
            ),
    )
}

fn link_ids<'a>(items: &[ViewItem<'a>]) -> Vec<&'a str> {
    items.iter().map(ViewItem::link_id).collect()
}

#[test]
fn group_and_child_flatten_in_pre_order() {
    let questionnaire = basic_questions();
    let response = reconcile(&questionnaire, None).expect("reconcile");
    let items = flatten(&questionnaire.items, &response.items);

    assert_eq!(items.len(), 2);

    let first = &items[0];
    assert_eq!(first.definition.link_id, "a-link-id");
    assert_eq!(first.definition.text.as_deref(), Some("Basic questions"));
    assert_eq!(first.definition.kind, ItemType::Group);
    assert_eq!(first.response.link_id, "a-link-id");
    assert_eq!(first.path, ItemPath::new(vec![0]));

    let second = &items[1];
    assert_eq!(second.definition.link_id, "another-link-id");
    assert_eq!(second.definition.text.as_deref(), Some("Name?"));
    assert_eq!(second.definition.kind, ItemType::String);
    assert_eq!(second.response.link_id, "another-link-id");
    assert_eq!(second.path, ItemPath::new(vec![0, 0]));
}

#[test]
fn flattening_is_idempotent() {
    let questionnaire = basic_questions();
    let response = reconcile(&questionnaire, None).expect("reconcile");

    let first = flatten(&questionnaire.items, &response.items);
    let second = flatten(&questionnaire.items, &response.items);
    assert_eq!(link_ids(&first), link_ids(&second));
}

#[test]
fn siblings_never_interleave() {
    let questionnaire = Questionnaire::new("q")
        .with_item(
            QuestionnaireItem::new("g1", ItemType::Group)
                .with_item(QuestionnaireItem::new("g1.a", ItemType::String))
                .with_item(
                    QuestionnaireItem::new("g1.b", ItemType::Group)
                        .with_item(QuestionnaireItem::new("g1.b.x", ItemType::Integer)),
                ),
        )
        .with_item(QuestionnaireItem::new("tail", ItemType::Boolean));
    let response = reconcile(&questionnaire, None).expect("reconcile");

    let items = flatten(&questionnaire.items, &response.items);
    assert_eq!(link_ids(&items), vec!["g1", "g1.a", "g1.b", "g1.b.x", "tail"]);
    let depths: Vec<_> = items.iter().map(ViewItem::depth).collect();
    assert_eq!(depths, vec![0, 1, 1, 2, 0]);
}

#[test]
fn empty_forest_has_no_items() {
    let response = QuestionnaireResponse::default();
    assert!(flatten(&[], &response.items).is_empty());
}
