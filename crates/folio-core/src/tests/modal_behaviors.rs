//! Behavioral tests for the project modal lifecycle

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use crate::modal::{
    Anchor, ModalContent, ModalMachine, ModalPhase, ModalSession, OpenOutcome, Restore,
};
use crate::record::{Link, ProjectRecord};

fn bondi() -> ProjectRecord {
    ProjectRecord::new("Bondi")
        .with_description("A demo app")
        .with_image("https://img/x.png")
        .with_technologies(["Go", "Docker"])
        .with_demo(Link::from_raw("https://bondi.example/"))
        .with_code(Link::from_raw("https://github.com/x/Bondi"))
}

fn session_from_projects_section() -> ModalSession<&'static str, &'static str> {
    ModalSession {
        anchor: Some(Anchor {
            parent: "section#projects",
            next_sibling: Some("div.after-modal"),
        }),
        scroll_lock_offset: 1234.0,
        previously_focused: Some("div.card[Bondi]"),
    }
}

// ============================================================================
// CONTENT BEHAVIORS
// ============================================================================

#[test]
fn given_bondi_record_when_populating_then_title_chips_and_links_match() {
    let content = ModalContent::from_record(&bondi());

    assert_eq!(content.title, "Bondi");
    assert_eq!(content.chips, vec!["Go", "Docker"]);
    assert!(content.actions.iter().all(|a| a.is_enabled()));
    assert_eq!(content.actions[0].label, "Live Demo");
    assert_eq!(content.actions[0].link.href(), Some("https://bondi.example/"));
    assert_eq!(content.actions[1].label, "Source Code");
    assert_eq!(content.actions[1].link.href(), Some("https://github.com/x/Bondi"));
}

#[test]
fn given_absent_markers_when_populating_then_both_actions_stay_but_disabled() {
    let record = bondi().with_demo(Link::from_raw("#")).with_code(Link::from_raw("#"));

    let content = ModalContent::from_record(&record);

    assert_eq!(content.actions.len(), 2);
    assert!(content.actions.iter().all(|a| !a.is_enabled()));
}

#[test]
fn given_record_without_image_or_title_when_populating_then_image_hidden_with_fallback_alt() {
    let content = ModalContent::from_record(&ProjectRecord::default());

    assert_eq!(content.image, None);
    assert_eq!(content.image_alt, "Project preview");
}

// ============================================================================
// LIFECYCLE BEHAVIORS
// ============================================================================

#[test]
fn given_bondi_open_when_closed_then_original_position_and_focus_return() {
    let mut machine = ModalMachine::new();

    let opened = machine.open(session_from_projects_section);
    machine.entrance_finished(opened.generation());
    let exit = machine.close().unwrap();
    let session = machine.exit_finished(exit).unwrap();

    assert_eq!(machine.phase(), ModalPhase::Closed);
    assert_eq!(session.previously_focused, Some("div.card[Bondi]"));
    assert_eq!(
        session.restore_point(|sibling, parent| *sibling == "div.after-modal"
            && *parent == "section#projects"),
        Restore::Before {
            parent: "section#projects",
            sibling: "div.after-modal",
        }
    );
}

#[test]
fn given_sibling_removed_while_open_when_closed_then_dialog_is_appended() {
    let mut machine = ModalMachine::new();
    machine.open(session_from_projects_section);
    let session = machine.close().and_then(|g| machine.exit_finished(g)).unwrap();

    assert_eq!(
        session.restore_point(|_, _| false),
        Restore::Append {
            parent: "section#projects"
        }
    );
}

#[test]
fn given_open_modal_when_another_card_opens_then_no_intermediate_close() {
    let mut machine = ModalMachine::new();
    let mut captures = 0;

    machine.open(|| {
        captures += 1;
        session_from_projects_section()
    });
    let second = machine.open(|| {
        captures += 1;
        session_from_projects_section()
    });

    assert!(matches!(second, OpenOutcome::Refreshed { .. }));
    assert_eq!(captures, 1);
    assert!(machine.is_open());
}

#[test]
fn given_closed_modal_when_closing_then_nothing_happens() {
    let mut machine: ModalMachine<&str, &str> = ModalMachine::new();

    assert_eq!(machine.close(), None);
    assert_eq!(machine.phase(), ModalPhase::Closed);
}
