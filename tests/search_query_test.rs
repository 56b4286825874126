use trip_planner_api::services::search_query::{build_search_query, SearchQueryBuilder};

#[test]
fn test_never_panics_on_odd_input() {
    let inputs = [
        "",
        " ",
        "\t\n",
        "...",
        "!!! ??? ---",
        "Zürich café crème",
        "東京 京都 大阪",
        "a b c d e f g",
        "TRIP TRIP TRIP",
        "St. Petersburg, Russia",
    ];

    for title in inputs {
        let query = build_search_query(title, None);
        let with_description = build_search_query(title, Some(title));
        if !title.is_empty() {
            assert!(!query.is_empty(), "empty query for {:?}", title);
            assert!(!with_description.is_empty(), "empty query for {:?}", title);
        }
    }
}

#[test]
fn test_description_words_join_the_query() {
    assert_eq!(build_search_query("My Trip", None), "trip");
    assert_eq!(
        build_search_query("My Trip", Some("patagonia glaciers")),
        "patagonia glaciers trip"
    );
}

#[test]
fn test_query_has_at_most_five_words() {
    let title = "Norway Sweden Finland Denmark Iceland Estonia Latvia Lithuania Poland Germany";
    let query = build_search_query(title, Some("Fjords, lakes, islands and northern castles"));
    assert_eq!(query.split(' ').count(), 5);
}

#[test]
fn test_top_scores_win_over_text_order() {
    // "fjords" and "islands" are capitalised geographic terms (9), countries score 7
    let query = build_search_query("Norway Sweden Finland Fjords Islands", None);
    assert_eq!(query, "fjords islands norway sweden finland");
}

#[test]
fn test_non_ascii_letters_are_stripped_from_keywords() {
    assert_eq!(build_search_query("Zürich", None), "zrich");
}

#[test]
fn test_abbreviated_place_particle() {
    // "St." cleans to "st": 1 + 4 (capital) + 2 (geographic)
    let scored = SearchQueryBuilder::score_words("St. Petersburg");
    assert_eq!(scored[0].word, "st");
    assert_eq!(scored[0].score, 7.0);
    assert_eq!(build_search_query("St. Petersburg, Russia", None), "st petersburg russia");
}

#[test]
fn test_unicode_only_title_is_returned_as_is() {
    assert_eq!(build_search_query("東京 京都", None), "東京 京都");
}
