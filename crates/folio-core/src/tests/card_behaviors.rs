//! Behavioral tests for card records travelling through the page

#![allow(clippy::unwrap_used)]

use crate::card::CardView;
use crate::config::SiteConfig;
use crate::modal::ModalContent;
use crate::record::{CardText, decode_card};
use crate::repo::Repository;

#[test]
fn given_built_card_when_decoding_its_attribute_then_record_round_trips() {
    let mut repo = Repository::new("octo", "notes")
        .with_language("TypeScript")
        .with_topics(["pwa"]);
    repo.description = Some("Offline notes".to_string());
    repo.html_url = "https://github.com/octo/notes".to_string();
    repo.has_pages = true;

    let view = CardView::from_repository(&repo, None, &SiteConfig::default()).unwrap();
    let decoded = decode_card(Some(&view.data_attribute), CardText::default);

    assert_eq!(decoded, view.record);
}

#[test]
fn given_card_without_links_when_opened_then_both_actions_are_disabled() {
    let repo = Repository::new("octo", "private-ish");

    let view = CardView::from_repository(&repo, None, &SiteConfig::default()).unwrap();
    let content = ModalContent::from_record(&view.record);

    assert!(content.actions.iter().all(|action| !action.is_enabled()));
}

#[test]
fn given_static_card_with_broken_attribute_when_decoded_then_visible_text_is_used() {
    let record = decode_card(Some(r#"{"title": "unterminated"#), || CardText {
        title: "Portfolio".to_string(),
        description: "This site".to_string(),
        image_url: "assets/img/site.png".to_string(),
    });

    let content = ModalContent::from_record(&record);

    assert_eq!(content.title, "Portfolio");
    assert_eq!(content.image.as_deref(), Some("assets/img/site.png"));
    assert!(content.chips.is_empty());
}
