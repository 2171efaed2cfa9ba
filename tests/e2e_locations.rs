//! Location and location link E2E tests

mod helper;

use editor_lsp_client::host::HeadlessEditor;
use editor_lsp_client::lsp::location::{PartialLocation, PartialLocationLink};
use tower_lsp::lsp_types::*;

use helper::{TestWorkspace, create_client, range, uri};

fn location(url: Url, range: Range) -> PartialLocation {
    Location::new(url, range).into()
}

#[test]
fn groups_results_by_file_in_input_order() {
    let workspace = TestWorkspace::new();
    let a = workspace.write("src/A.kt", "fun a() = b()\nfun b() = 1\n");
    let b = workspace.write("src/B.kt", "fun c() = b()\n");
    let mut client = create_client();

    client.show_locations(&[
        location(uri(&a), range((1, 4), (1, 5))),
        location(uri(&b), range((0, 10), (0, 11))),
        location(uri(&a), range((0, 10), (0, 11))),
    ]);

    let results = client.search_results();
    assert_eq!(results.len(), 2);
    assert_eq!(results.total_results(), 3);

    let in_a = results.get(&a).unwrap();
    assert_eq!(in_a[0].line, "fun b() = 1");
    assert_eq!(in_a[1].line, "fun a() = b()");
    assert!(in_a.iter().all(|r| r.matched == "b"));

    let files: Vec<_> = results.iter().map(|(file, _)| file.clone()).collect();
    assert_eq!(files, vec![a, b]);

    let host = client.host().unwrap();
    assert!(!host.search_results_empty);
    assert_eq!(&host.search_results, client.search_results());
}

#[test]
fn counts_only_locations_in_existing_files() {
    let workspace = TestWorkspace::new();
    let a = workspace.write("src/A.kt", "val answer = 42\n");
    let mut client = create_client();

    client.show_locations(&[
        location(uri(&a), range((0, 4), (0, 10))),
        location(uri(&workspace.path("src/Missing.kt")), range((0, 0), (0, 1))),
        location(uri(&workspace.path("src")), range((0, 0), (0, 1))),
        PartialLocation {
            uri: Some(uri(&a)),
            range: None,
        },
        PartialLocation::default(),
        location(uri(&a), range((0, 13), (0, 15))),
    ]);

    let results = client.search_results();
    assert_eq!(results.total_results(), 2);
    let matched: Vec<_> = results.get(&a).unwrap().iter().map(|r| r.matched.as_str()).collect();
    assert_eq!(matched, vec!["answer", "42"]);
}

#[test]
fn reads_unsaved_text_from_open_editor() {
    let workspace = TestWorkspace::new();
    let a = workspace.write("src/A.kt", "val saved = 1\n");
    let mut client = create_client();
    client
        .host_mut()
        .unwrap()
        .open(HeadlessEditor::new(&a, "val edited = 1\n"));

    client.show_locations(&[location(uri(&a), range((0, 4), (0, 10)))]);

    let result = &client.search_results().get(&a).unwrap()[0];
    assert_eq!(result.line, "val edited = 1");
    assert_eq!(result.matched, "edited");
}

#[test]
fn new_batch_replaces_previous_batch() {
    let workspace = TestWorkspace::new();
    let a = workspace.write("src/A.kt", "val a = 1\n");
    let b = workspace.write("src/B.kt", "val b = 2\n");
    let mut client = create_client();

    client.show_locations(&[location(uri(&a), range((0, 4), (0, 5)))]);
    client.show_locations(&[location(uri(&b), range((0, 4), (0, 5)))]);

    let results = client.search_results();
    assert!(results.get(&a).is_none());
    assert_eq!(results.total_results(), 1);
}

#[test]
fn location_links_resolve_to_target_ranges() {
    let workspace = TestWorkspace::new();
    let a = workspace.write("src/A.kt", "class Greeter {\n  fun greet() = \"hi\"\n}\n");
    let mut client = create_client();

    client.show_location_links(&[
        LocationLink {
            origin_selection_range: Some(range((9, 0), (9, 5))),
            target_uri: uri(&a),
            target_range: range((1, 2), (1, 20)),
            target_selection_range: range((1, 6), (1, 11)),
        }
        .into(),
        PartialLocationLink {
            target_uri: Some(uri(&a)),
            ..Default::default()
        },
    ]);

    let results = client.search_results().get(&a).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].matched, "fun greet() = \"hi\"");
}

#[test]
fn links_without_targets_show_empty_state() {
    let mut client = create_client();

    client.show_location_links(&[PartialLocationLink::default()]);

    let host = client.host().unwrap();
    assert!(host.search_results_empty);
    assert!(client.search_results().is_empty());
}
