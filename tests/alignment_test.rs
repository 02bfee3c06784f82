//! Integration tests for the alignment engine.

use bitext::model::Fragment;
use bitext::parser::{
    prefix_fragments, AlignmentHintParser, BalancedSlicer, ParagraphSplitter, SlicedDocument,
    TagCatalog,
};
use bitext::render::RenderOptions;
use bitext::{align, split_paragraphs, AlignOptions, Bitext, CutMode, Direction, Document};
use bitext::align::ColumnComposer;

fn en(html: &str) -> Document {
    Document::new(html, "en").with_display_name("English")
}

fn fr(html: &str) -> Document {
    Document::new(html, "fr").with_display_name("Français")
}

// ==================== Scenarios ====================

#[test]
fn test_single_paragraphs_without_hints_make_one_row() {
    let alignment = align(
        &en("<p>The cat sleeps.</p>"),
        &fr("<p>Le chat dort.</p>"),
        &AlignOptions::default(),
    );

    assert_eq!(alignment.rows.len(), 1);
    assert_eq!(alignment.rows[0].left.as_str(), "<p>The cat sleeps.</p>");
    assert_eq!(alignment.rows[0].right.as_str(), "<p>Le chat dort.</p>");

    let table = alignment.to_html(&RenderOptions::default());
    assert_eq!(table.matches("<tr>").count(), 2); // header + one body row
    assert_eq!(table.matches("<td ").count(), 2);
}

#[test]
fn test_hint_creates_marker_and_two_fragments() {
    let html = concat!(
        r#"<div class="bilingual-hints" data-lang="fr"><pre>Hello = Bonjour</pre></div>"#,
        "<p>Intro.</p><p>Hello world.</p>"
    );
    let parsed = AlignmentHintParser::default().parse(html, "fr");

    assert_eq!(parsed.markers.len(), 1);
    assert_eq!(parsed.markers[0].title, "Bonjour");
    assert!(parsed.html[parsed.markers[0].offset..].starts_with("Hello world."));

    let sliced = BalancedSlicer::new(TagCatalog::standard()).slice(&parsed.html, &parsed.markers);
    assert_eq!(sliced.fragments.len(), 2);
    assert_eq!(sliced.fragments[0].html, "<p>Intro.</p>");
    assert_eq!(sliced.fragments[1].html, "<p>Hello world.</p>");

    let alignment = align(
        &en(html),
        &fr("<p>Introduction.</p><p>Bonjour le monde.</p>"),
        &AlignOptions::default(),
    );
    assert_eq!(alignment.rows.len(), 2);
    assert_eq!(alignment.rows[1].right.as_str(), "<p>Bonjour le monde.</p>");
}

#[test]
fn test_paragraph_count_mismatch_falls_back_to_one_row() {
    let alignment = align(
        &en("<p>One.</p><p>Two.</p><p>Three.</p>"),
        &fr("<p>Un et deux.</p><p>Trois.</p>"),
        &AlignOptions::default(),
    );

    assert_eq!(alignment.rows.len(), 1);
    assert_eq!(alignment.rows[0].left.as_str(), "<p>One.</p><p>Two.</p><p>Three.</p>");
    assert_eq!(alignment.rows[0].right.as_str(), "<p>Un et deux.</p><p>Trois.</p>");
    assert_eq!(alignment.stats.fallback_count, 1);
}

#[test]
fn test_in_page_anchors_do_not_collide() {
    let alignment = align(
        &en(r##"<p><a href="#sec1">Go</a></p><p id="sec1">Section</p>"##),
        &fr(r##"<p><a href="#sec1">Aller</a></p><p id="sec1">Partie</p>"##),
        &AlignOptions::default(),
    );

    let left = alignment.left_text();
    let right = alignment.right_text();
    assert!(left.contains(r##"href="#r_sec1""##));
    assert!(left.contains(r#"id="r_sec1""#));
    assert!(right.contains(r##"href="#l_sec1""##));
    assert!(right.contains(r#"id="l_sec1""#));
}

#[test]
fn test_root_relative_link_keeps_view_active() {
    let alignment = align(
        &en(r#"<p>See <a href="/Page_X">X</a>.</p>"#),
        &Document::new("<p>Siehe X.</p>", "de"),
        &AlignOptions::default(),
    );

    assert!(alignment
        .left_text()
        .contains(r#"<a href="/Page_X?match=de">"#));
}

// ==================== Properties ====================

#[test]
fn test_paragraph_split_is_lossless() {
    let samples = [
        "",
        "plain text",
        "<p>a</p>",
        "<p>a</p>\n<p>b</p>\n",
        "<div><p>nested</p></div><p>after</p> tail",
        "<ul><li>x</li></ul><p>y</p><!-- </p> -->",
        "</p>stray<p>z</p>",
    ];
    for html in samples {
        let joined: String = split_paragraphs(html).iter().map(|u| u.as_str()).collect();
        assert_eq!(joined, html);
    }
}

#[test]
fn test_sliced_fragments_are_balanced() {
    let html = concat!(
        r#"<div class="bilingual-hints" data-lang="de"><pre>"#,
        "beta = Beta\nThree = Drei\nFour = Vier\nseven = sieben\n",
        "</pre></div>",
        r#"<div class="wrap"><h2>One</h2><p>Alpha <b>beta</b> gamma</p>"#,
        "<table><tr><td>Three</td><td>x</td></tr></table>",
        "<blockquote><p>Four <i>five</i></p></blockquote><p>six seven</p></div>"
    );
    let catalog = TagCatalog::standard();
    let parsed = AlignmentHintParser::default().parse(html, "de");
    assert_eq!(parsed.markers.len(), 4);

    let sliced = BalancedSlicer::new(catalog).slice(&parsed.html, &parsed.markers);
    assert_eq!(sliced.fragments.len(), 5);
    for fragment in sliced.fragments.iter().filter(|f| !f.is_empty()) {
        let (open, close) = catalog.balance_counts(&fragment.html);
        assert_eq!(open, close, "unbalanced fragment: {}", fragment.html);
        assert!(catalog.is_balanced(&fragment.html));
    }
}

#[test]
fn test_mismatch_always_yields_exactly_one_row() {
    let catalog = TagCatalog::standard();
    let splitter = ParagraphSplitter::new(catalog);
    let cases = [
        ("<p>a</p><p>b</p>", "<p>x</p>"),
        ("<p>a</p>", "<p>x</p><p>y</p><p>z</p>"),
        ("<p>a</p>tail", "<p>x</p>"),
    ];

    for (left, right) in cases {
        assert_ne!(splitter.count(left), splitter.count(right));
        let local = SlicedDocument {
            fragments: vec![Fragment::new(left)],
            ..Default::default()
        };
        let mut composer = ColumnComposer::new(catalog, CutMode::default());
        let rows = composer.compose(&local, right);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].left.as_str(), left);
        assert_eq!(rows[0].right.as_str(), right);
    }
}

#[test]
fn test_link_prefixing_is_idempotent() {
    let html = r##"<h2 id="h">H</h2><a href="#h">up</a><a href="/Wiki">w</a>"##;
    for prefix in ["l_", "r_"] {
        let once = prefix_fragments(html, prefix);
        assert_eq!(prefix_fragments(&once, prefix), once);
    }
}

#[test]
fn test_alignment_is_deterministic() {
    let local = en(concat!(
        r#"<div class="bilingual-hints" data-lang="fr">Second = Deuxième</div>"#,
        "<p>First.</p><p>Second.</p>"
    ));
    let foreign = fr("<p>Premier.</p><p>Deuxième.</p>");
    let bitext = Bitext::new();

    let first = bitext.render(&local, &foreign);
    for _ in 0..5 {
        assert_eq!(bitext.render(&local, &foreign), first);
    }
}

#[test]
fn test_columns_reconstruct_documents() {
    let local = en(concat!(
        r#"<div class="bilingual-hints" data-lang="fr">B = Bé</div>"#,
        "<p>A.</p>\n<p>B.</p>\n<p>C.</p>\n"
    ));
    let foreign = fr("<p>Á.</p>\n<p>Bé.</p>\n<p>Cé.</p>\n");
    let options = AlignOptions::default().with_link_rewriting(false);
    let alignment = align(&local, &foreign, &options);

    assert_eq!(alignment.left_text(), "<p>A.</p>\n<p>B.</p>\n<p>C.</p>\n");
    assert_eq!(alignment.right_text(), foreign.html);
    assert_eq!(alignment.rows.len(), 3);
}

// ==================== Realistic pages ====================

#[test]
fn test_wrapped_wiki_page_with_sections() {
    let local = en(concat!(
        r#"<div class="mw-parser-output">"#,
        r#"<div class="bilingual-hints" data-lang="de" style="display:none"><pre>"#,
        "History = Geschichte\n",
        "Biology = Biologie\n",
        "</pre></div>",
        "<p>The cat is a mammal.</p>",
        "<h2>History</h2><p>Cats were domesticated.</p>",
        "<h2>Biology</h2><p>Cats have whiskers.</p><p>They purr.</p>",
        "</div>"
    ));
    let foreign = Document::new(
        concat!(
            r#"<div class="mw-parser-output">"#,
            "<p>Die Katze ist ein Säugetier.</p>",
            "<h2>Geschichte</h2><p>Katzen wurden domestiziert.</p>",
            "<h2>Biologie</h2><p>Katzen haben Schnurrhaare.</p><p>Sie schnurren.</p>",
            "</div>"
        ),
        "de",
    );

    let alignment = align(&local, &foreign, &AlignOptions::default());
    let catalog = TagCatalog::standard();

    assert_eq!(alignment.markers.len(), 2);
    assert_eq!(alignment.rows.len(), 3);
    assert!(alignment.rows[0].right.as_str().contains("Säugetier"));
    assert!(alignment.rows[1].left.as_str().contains("<h2>History</h2>"));
    assert!(alignment.rows[1].right.as_str().contains("<h2>Geschichte</h2>"));
    assert!(alignment.rows[2].right.as_str().contains("Sie schnurren."));
    for row in &alignment.rows {
        assert!(catalog.is_balanced(row.left.as_str()), "{}", row.left.as_str());
    }
    assert!(!alignment.left_text().contains("bilingual-hints"));
}

#[test]
fn test_cut_inside_wrapper_does_not_duplicate_its_id() {
    let local = en(concat!(
        r#"<div class="bilingual-hints" data-lang="fr">Hello = Bonjour</div>"#,
        r#"<div id="content"><p>Intro</p><p>Hello</p></div>"#
    ));
    let foreign = fr("<p>Intro FR</p><p>Bonjour</p>");
    let alignment = align(&local, &foreign, &AlignOptions::default());

    let left = alignment.left_text();
    assert_eq!(alignment.rows.len(), 2);
    assert_eq!(left.matches(r#"id="r_content""#).count(), 1);
    assert_eq!(alignment.rows[1].left.as_str(), "<div><p>Hello</p></div>");

    let table = alignment.to_html(&RenderOptions::default());
    assert_eq!(table.matches(r#"id="r_content""#).count(), 1);
}

#[test]
fn test_quoted_markup_in_text_is_not_rewritten() {
    let local = en(r##"<p>Use <code>&lt;span id="x"&gt;</code> and write href="#x" to link.</p>"##);
    let foreign = fr(r##"<p>Écrivez id="x" dans le code.</p>"##);
    let alignment = align(&local, &foreign, &AlignOptions::default());

    assert_eq!(alignment.left_text(), local.html);
    assert_eq!(alignment.right_text(), foreign.html);
}

#[test]
fn test_missing_counterpart_merges_sections() {
    let local = en(concat!(
        r#"<div class="bilingual-hints" data-lang="fr">"#,
        "Second = Introuvable\nThird = Troisième\n",
        "</div>",
        "<p>First.</p><p>Second.</p><p>Third.</p>"
    ));
    let foreign = fr("<p>Premier.</p><p>Deuxième.</p><p>Troisième.</p>");
    let alignment = align(&local, &foreign, &AlignOptions::default());

    assert_eq!(alignment.markers.len(), 2);
    // First and second fragments accumulate until "Troisième" is found.
    assert_eq!(alignment.stats.chunk_count, 2);
    assert_eq!(alignment.rows.len(), 3);
    assert_eq!(alignment.rows[1].left.as_str(), "<p>Second.</p>");
    assert_eq!(alignment.rows[1].right.as_str(), "<p>Deuxième.</p>");
}

#[test]
fn test_hints_for_other_languages_are_ignored_but_stripped() {
    let local = en(concat!(
        r#"<div class="bilingual-hints" data-lang="de">Two = Zwei</div>"#,
        "<p>One.</p><p>Two.</p>"
    ));
    let alignment = align(&local, &fr("<p>Un.</p><p>Deux.</p>"), &AlignOptions::default());

    assert!(alignment.hints.is_empty());
    assert!(alignment.markers.is_empty());
    assert_eq!(alignment.rows.len(), 2);
    assert_eq!(alignment.left_text(), "<p>One.</p><p>Two.</p>");
}

#[test]
fn test_rtl_foreign_cells() {
    let foreign = Document::new("<p>החתול ישן.</p>", "he").with_direction(Direction::Rtl);
    let table = Bitext::new().render(&en("<p>The cat sleeps.</p>"), &foreign);

    assert!(table.contains(r#"<td lang="he" dir="rtl" class="mw-content-rtl">"#));
    assert_eq!(Direction::detect(&foreign.html), Direction::Rtl);
}

#[test]
fn test_top_level_cut_mode_waits_for_depth_zero() {
    let local = en(concat!(
        r#"<div class="bilingual-hints" data-lang="fr">B = Bé</div>"#,
        "<p>A.</p><p>B.</p>"
    ));
    let foreign = fr("<div><p>Á.</p><p>Bé.</p></div>");

    let any = align(&local, &foreign, &AlignOptions::default());
    assert_eq!(any.stats.chunk_count, 2);

    let options = AlignOptions::default().with_cut_mode(CutMode::TopLevel);
    let top = align(&local, &foreign, &options);
    assert_eq!(top.stats.chunk_count, 1);
    assert_eq!(top.right_text(), foreign.html);
}
