use super::*;
use crate::{builder::Builder, params::WithParameters};
use serde_json::json;

#[test]
fn match_all_serializes_to_an_empty_object() {
    assert_eq!(
        MatchAllQuery::new().serialize().unwrap(),
        json!({ "match_all": {} })
    );
}

#[test]
fn match_all_emits_parameters_when_set() {
    let query = MatchAllQuery::new().with_parameter("boost", 1.2);

    assert_eq!(
        query.serialize().unwrap(),
        json!({ "match_all": { "boost": 1.2 } })
    );
}

#[test]
fn match_wraps_the_query_under_the_field() {
    let query = MatchQuery::new("message", "this is a test");

    assert_eq!(
        query.serialize().unwrap(),
        json!({
            "match": { "message": { "query": "this is a test" } }
        })
    );
}

#[test]
fn match_parameters_ride_next_to_the_query() {
    let query = MatchQuery::new("message", "test").with_parameter("operator", "and");

    assert_eq!(
        query.serialize().unwrap(),
        json!({
            "match": { "message": { "query": "test", "operator": "and" } }
        })
    );
}

#[test]
fn match_phrase_uses_its_own_tag() {
    let query = MatchPhraseQuery::new("message", "quick fox");

    assert_eq!(
        query.serialize().unwrap(),
        json!({
            "match_phrase": { "message": { "query": "quick fox" } }
        })
    );
}

#[test]
fn simple_query_string_keeps_fields_in_parameters() {
    let query = SimpleQueryStringQuery::new("\"fried eggs\" +(eggplant | potato)")
        .with_parameter("fields", json!(["title", "body"]));

    assert_eq!(
        query.serialize().unwrap(),
        json!({
            "simple_query_string": {
                "query": "\"fried eggs\" +(eggplant | potato)",
                "fields": ["title", "body"],
            }
        })
    );
}

#[test]
fn term_emits_the_bare_value_without_parameters() {
    assert_eq!(
        TermQuery::new("user", "bob").serialize().unwrap(),
        json!({ "term": { "user": "bob" } })
    );
}

#[test]
fn term_expands_to_the_value_form_with_parameters() {
    let query = TermQuery::new("user", "bob").with_parameter("boost", 2);

    assert_eq!(
        query.serialize().unwrap(),
        json!({ "term": { "user": { "boost": 2, "value": "bob" } } })
    );
}

#[test]
fn terms_lists_the_values_under_the_field() {
    let query = TermsQuery::new("user", ["bob", "elasticsearch"]);

    assert_eq!(
        query.serialize().unwrap(),
        json!({ "terms": { "user": ["bob", "elasticsearch"] } })
    );
}

#[test]
fn range_emits_bounds_in_insertion_order() {
    let query = RangeQuery::new("age").gte(10).lt(20);

    assert_eq!(
        query.serialize().unwrap(),
        json!({ "range": { "age": { "gte": 10, "lt": 20 } } })
    );
}

#[test]
fn range_inclusive_bounds_suppress_exclusive_ones() {
    let query = RangeQuery::new("age").gt(9).gte(10).lt(21).lte(20);

    assert_eq!(
        query.serialize().unwrap(),
        json!({ "range": { "age": { "gte": 10, "lte": 20 } } })
    );
}

#[test]
fn exists_names_the_field() {
    assert_eq!(
        ExistsQuery::new("user").serialize().unwrap(),
        json!({ "exists": { "field": "user" } })
    );
}

#[test]
fn prefix_wraps_the_value() {
    assert_eq!(
        PrefixQuery::new("user", "ki").serialize().unwrap(),
        json!({ "prefix": { "user": { "value": "ki" } } })
    );
}

#[test]
fn wildcard_wraps_the_value() {
    assert_eq!(
        WildcardQuery::new("user", "ki*y").serialize().unwrap(),
        json!({ "wildcard": { "user": { "value": "ki*y" } } })
    );
}

#[test]
fn ids_lists_the_values() {
    assert_eq!(
        IdsQuery::new(["foo", "bar"]).serialize().unwrap(),
        json!({ "ids": { "values": ["foo", "bar"] } })
    );
}

#[test]
fn nested_serializes_its_inner_query() {
    let query = NestedQuery::new("comments", MatchQuery::new("comments.text", "nice"));

    assert_eq!(
        query.serialize().unwrap(),
        json!({
            "nested": {
                "path": "comments",
                "query": { "match": { "comments.text": { "query": "nice" } } },
            }
        })
    );
}

#[test]
fn script_nests_the_inline_source() {
    let query = ScriptQuery::new("doc['num1'].value > 1");

    assert_eq!(
        query.serialize().unwrap(),
        json!({
            "script": { "script": { "inline": "doc['num1'].value > 1" } }
        })
    );
}

#[test]
fn shared_builder_serializes_identically_for_every_owner() {
    let shared: crate::builder::BuilderRef = TermQuery::new("a", 1).into();

    let mut first = BoolQuery::new();
    first.add(shared.clone(), BoolClause::Must);
    first.add(TermQuery::new("b", 2), BoolClause::Must);

    let mut second = BoolQuery::new();
    second.add(shared.clone(), BoolClause::Filter);

    assert_eq!(
        first.serialize().unwrap(),
        json!({
            "bool": {
                "must": [{ "term": { "a": 1 } }, { "term": { "b": 2 } }]
            }
        })
    );
    assert_eq!(
        second.serialize().unwrap(),
        json!({
            "bool": {
                "filter": [{ "term": { "a": 1 } }]
            }
        })
    );
    // the shared instance is still intact and reusable
    assert_eq!(shared.serialize().unwrap(), json!({ "term": { "a": 1 } }));
}
