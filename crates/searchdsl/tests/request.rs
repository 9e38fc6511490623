//! End-to-end request assembly.

use searchdsl::{
    Search,
    aggregation::{AvgAggregation, DateHistogramAggregation, TermsAggregation},
    highlight::Highlight,
    inner_hit::InnerHit,
    params::WithParameters,
    query::{BoolClause, MatchQuery, RangeQuery, TermQuery},
    search::TrackTotalHits,
    sort::{FieldSort, SortOrder},
    suggest::Suggest,
};
use serde_json::json;

#[test]
fn single_match_query_request() {
    let mut search = Search::new().add_query(MatchQuery::new("message", "test"));

    assert_eq!(
        search.to_value().unwrap(),
        json!({
            "query": { "match": { "message": { "query": "test" } } }
        })
    );
}

#[test]
fn two_must_terms_emit_the_bool_wrapper() {
    let mut search = Search::new()
        .add_query(TermQuery::new("a", 1))
        .add_query(TermQuery::new("b", 2));

    assert_eq!(
        search.to_value().unwrap(),
        json!({
            "query": {
                "bool": {
                    "must": [
                        { "term": { "a": 1 } },
                        { "term": { "b": 2 } },
                    ]
                }
            }
        })
    );
}

#[test]
fn empty_request_serializes_to_an_empty_object() {
    let mut search = Search::new();

    assert_eq!(search.to_value().unwrap(), json!({}));
}

#[test]
fn scalars_emit_only_when_set() {
    let mut search = Search::new()
        .from(40)
        .size(20)
        .source(false)
        .explain(true)
        .min_score(0.5)
        .search_after([json!(1_463_538_857_u64), json!("tie")])
        .track_total_hits(TrackTotalHits::Limit(10_000));

    assert_eq!(
        search.to_value().unwrap(),
        json!({
            "from": 40,
            "size": 20,
            "_source": false,
            "explain": true,
            "min_score": 0.5,
            "search_after": [1_463_538_857_u64, "tie"],
            "track_total_hits": 10_000,
        })
    );
}

#[test]
fn track_total_hits_accepts_a_plain_bool() {
    let mut search = Search::new().track_total_hits(false);

    assert_eq!(
        search.to_value().unwrap(),
        json!({ "track_total_hits": false })
    );
}

#[test]
fn post_filter_feeds_the_query_filter_clause_exactly_once() {
    let mut search = Search::new()
        .add_query(MatchQuery::new("message", "test"))
        .add_post_filter(TermQuery::new("status", "published"));

    let expected = json!({
        "post_filter": { "term": { "status": "published" } },
        "query": {
            "bool": {
                "must": [{ "match": { "message": { "query": "test" } } }],
                "filter": [{ "term": { "status": "published" } }],
            }
        },
    });

    // three passes in a row: the reference merges once and stays merged
    assert_eq!(search.to_value().unwrap(), expected);
    assert_eq!(search.to_value().unwrap(), expected);
    assert_eq!(search.to_value().unwrap(), expected);
}

#[test]
fn post_filter_registration_order_does_not_matter() {
    // the filter is registered before any query exists
    let mut search = Search::new()
        .add_post_filter(TermQuery::new("status", "published"))
        .add_query(MatchQuery::new("message", "test"));

    let output = search.to_value().unwrap();
    let filters = output["query"]["bool"]["filter"].as_array().unwrap();

    assert_eq!(filters.len(), 1);
}

#[test]
fn repeat_serialization_is_byte_identical() {
    let mut search = Search::new()
        .add_query(MatchQuery::new("message", "test"))
        .add_query_to(RangeQuery::new("age").gte(18), BoolClause::Filter)
        .add_post_filter(TermQuery::new("status", "published"))
        .from(0)
        .size(10);

    let first = search.to_json().unwrap();
    let second = search.to_json().unwrap();
    let third = search.to_json().unwrap();

    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn full_request_assembles_every_section() {
    let mut search = Search::new()
        .add_query(MatchQuery::new("title", "rust").with_parameter("operator", "and"))
        .add_query_to(TermQuery::new("category", "books"), BoolClause::Filter)
        .add_post_filter(TermQuery::new("in_stock", true))
        .add_aggregation(
            TermsAggregation::new("genres").field("genre").with_aggregation(
                DateHistogramAggregation::new("monthly")
                    .field("published_at")
                    .calendar_interval("month")
                    .with_aggregation(AvgAggregation::new("avg_price").field("price")),
            ),
        )
        .unwrap()
        .add_sort(FieldSort::new("published_at").order(SortOrder::Desc))
        .unwrap()
        .add_suggest(Suggest::new("title_suggest", "term", "rst", "title"))
        .unwrap()
        .add_highlight(Highlight::new().tags("<em>", "</em>").field("title"))
        .unwrap()
        .add_inner_hit(InnerHit::nested(
            "recent_reviews",
            "reviews",
        ))
        .unwrap()
        .from(0)
        .size(25)
        .track_total_hits(true);

    assert_eq!(
        search.to_value().unwrap(),
        json!({
            "post_filter": { "term": { "in_stock": true } },
            "query": {
                "bool": {
                    "must": [{
                        "match": { "title": { "query": "rust", "operator": "and" } }
                    }],
                    "filter": [
                        { "term": { "category": "books" } },
                        { "term": { "in_stock": true } },
                    ],
                }
            },
            "sort": [{ "published_at": { "order": "desc" } }],
            "aggregations": {
                "genres": {
                    "terms": { "field": "genre" },
                    "aggregations": {
                        "monthly": {
                            "date_histogram": {
                                "field": "published_at",
                                "calendar_interval": "month",
                            },
                            "aggregations": {
                                "avg_price": { "avg": { "field": "price" } }
                            },
                        }
                    },
                }
            },
            "suggest": {
                "title_suggest": {
                    "text": "rst",
                    "term": { "field": "title" },
                }
            },
            "highlight": {
                "pre_tags": ["<em>"],
                "post_tags": ["</em>"],
                "fields": { "title": {} },
            },
            "inner_hits": {
                "recent_reviews": { "path": { "reviews": {} } }
            },
            "from": 0,
            "size": 25,
            "track_total_hits": true,
        })
    );
}

#[test]
fn unsupported_uri_param_is_rejected_at_the_setter() {
    let err = Search::new().add_uri_param("routing_table", 1).unwrap_err();

    assert_eq!(
        err,
        searchdsl::Error::UnsupportedParameter {
            name: "routing_table".to_string(),
        }
    );
}

#[test]
fn scroll_records_its_uri_param() {
    let search = Search::new()
        .scroll("5m")
        .add_uri_param("timeout", "1s")
        .unwrap();

    assert_eq!(search.scroll_duration(), Some("5m"));
    assert_eq!(search.uri_params().get("scroll"), Some(&json!("5m")));
    assert_eq!(search.uri_params().get("timeout"), Some(&json!("1s")));
}

#[test]
fn serde_serialize_matches_to_value_and_leaves_the_request_intact() {
    let search = Search::new()
        .add_query(MatchQuery::new("message", "test"))
        .add_post_filter(TermQuery::new("status", "published"));

    let through_serde = serde_json::to_value(&search).unwrap();
    let through_serde_again = serde_json::to_value(&search).unwrap();

    assert_eq!(through_serde, through_serde_again);
    assert_eq!(
        through_serde["query"]["bool"]["filter"]
            .as_array()
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn removed_queries_leave_an_explicit_empty_bool() {
    let mut search = Search::new().add_query_keyed(
        TermQuery::new("a", 1),
        BoolClause::Must,
        "only",
    );
    search.queries_mut().remove("only");

    assert_eq!(
        search.to_value().unwrap(),
        json!({ "query": { "bool": {} } })
    );
}
