use super::*;
use crate::{
    aggregation::AvgAggregation,
    builder::BuilderRef,
    error::Error,
    highlight::Highlight,
    query::{BoolClause, MatchAllQuery, TermQuery},
    resolve::{FILTER_QUERY, ResolutionContext},
    sort::{FieldSort, SortOrder},
    suggest::Suggest,
};
use serde_json::json;

fn term(field: &str, value: i64) -> BuilderRef {
    TermQuery::new(field, value).into()
}

#[test]
fn query_endpoint_add_targets_the_must_clause() {
    let mut endpoint = QueryEndpoint::new();
    endpoint.add(term("a", 1), None).unwrap();

    let bool_query = endpoint.bool_query().unwrap();
    assert_eq!(bool_query.queries(Some(BoolClause::Must)).len(), 1);
    assert!(bool_query.queries(Some(BoolClause::Filter)).is_empty());
}

#[test]
fn query_endpoint_is_silent_until_populated() {
    let mut endpoint = QueryEndpoint::new();
    let mut ctx = ResolutionContext::new();

    assert_eq!(endpoint.serialize(&mut ctx).unwrap(), None);

    endpoint.add(MatchAllQuery::new().into(), None).unwrap();
    assert_eq!(
        endpoint.serialize(&mut ctx).unwrap(),
        Some(json!({ "match_all": {} }))
    );
}

#[test]
fn query_endpoint_consumes_the_filter_reference_once() {
    let mut endpoint = QueryEndpoint::new();
    endpoint.add(term("a", 1), None).unwrap();

    let mut ctx = ResolutionContext::new();
    ctx.add_reference(FILTER_QUERY, term("status", 1));

    let first = endpoint.serialize(&mut ctx).unwrap().unwrap();
    assert_eq!(
        first,
        json!({
            "bool": {
                "must": [{ "term": { "a": 1 } }],
                "filter": [{ "term": { "status": 1 } }],
            }
        })
    );

    // a fresh context still offers the reference; the merge must not repeat
    let mut ctx = ResolutionContext::new();
    ctx.add_reference(FILTER_QUERY, term("status", 1));
    let second = endpoint.serialize(&mut ctx).unwrap().unwrap();
    assert_eq!(first, second);
}

#[test]
fn post_filter_endpoint_registers_the_filter_reference() {
    let mut endpoint = PostFilterEndpoint::new();
    endpoint.add(term("status", 1), None).unwrap();

    let mut ctx = ResolutionContext::new();
    let output = endpoint.serialize(&mut ctx).unwrap();

    assert_eq!(output, Some(json!({ "term": { "status": 1 } })));
    assert!(ctx.has_reference(FILTER_QUERY));
}

#[test]
fn post_filter_runs_before_query() {
    assert!(PostFilterEndpoint::new().priority() < QueryEndpoint::new().priority());
}

#[test]
fn sort_endpoint_emits_an_array_in_insertion_order() {
    let mut endpoint = SortEndpoint::new();
    endpoint
        .add(FieldSort::new("date").order(SortOrder::Desc).into(), None)
        .unwrap();
    endpoint.add(FieldSort::new("_score").into(), None).unwrap();

    let mut ctx = ResolutionContext::new();
    assert_eq!(
        endpoint.serialize(&mut ctx).unwrap(),
        Some(json!([
            { "date": { "order": "desc" } },
            { "_score": {} },
        ]))
    );
}

#[test]
fn aggregations_endpoint_keys_entries_by_name() {
    let mut endpoint = AggregationsEndpoint::new();
    endpoint
        .add(AvgAggregation::new("avg_price").field("price").into(), None)
        .unwrap();

    let mut ctx = ResolutionContext::new();
    assert_eq!(
        endpoint.serialize(&mut ctx).unwrap(),
        Some(json!({
            "avg_price": { "avg": { "field": "price" } }
        }))
    );
}

#[test]
fn aggregations_endpoint_rejects_duplicate_names() {
    let mut endpoint = AggregationsEndpoint::new();
    endpoint
        .add(AvgAggregation::new("avg_price").field("price").into(), None)
        .unwrap();
    let err = endpoint
        .add(AvgAggregation::new("avg_price").field("cost").into(), None)
        .unwrap_err();

    assert_eq!(
        err,
        Error::DuplicateKey {
            endpoint: "aggregations",
            key: "avg_price".to_string(),
        }
    );
}

#[test]
fn suggest_endpoint_merges_entries_into_one_object() {
    let mut endpoint = SuggestEndpoint::new();
    endpoint
        .add(Suggest::new("first", "term", "foo", "title").into(), None)
        .unwrap();
    endpoint
        .add(Suggest::new("second", "term", "bar", "body").into(), None)
        .unwrap();

    let mut ctx = ResolutionContext::new();
    assert_eq!(
        endpoint.serialize(&mut ctx).unwrap(),
        Some(json!({
            "first": { "text": "foo", "term": { "field": "title" } },
            "second": { "text": "bar", "term": { "field": "body" } },
        }))
    );
}

#[test]
fn highlight_endpoint_holds_exactly_one_entry() {
    let mut endpoint = HighlightEndpoint::new();
    let endpoint_key = endpoint.add(Highlight::new().field("title").into(), None).unwrap();

    let err = endpoint
        .add(Highlight::new().field("body").into(), None)
        .unwrap_err();
    assert_eq!(err, Error::HighlightOverflow);

    assert!(endpoint.has(&endpoint_key));
    assert!(endpoint.remove(&endpoint_key));
    assert!(endpoint.add(Highlight::new().field("body").into(), None).is_ok());
}

#[test]
fn registry_endpoints_reject_bool_clauses() {
    let mut endpoint = SortEndpoint::new();
    let err = endpoint
        .add_to_bool(term("a", 1), BoolClause::Must, None)
        .unwrap_err();

    assert_eq!(err, Error::BoolUnsupported { endpoint: "sort" });
}

#[test]
fn empty_registry_endpoints_are_omitted() {
    let mut ctx = ResolutionContext::new();

    assert_eq!(SortEndpoint::new().serialize(&mut ctx).unwrap(), None);
    assert_eq!(SuggestEndpoint::new().serialize(&mut ctx).unwrap(), None);
    assert_eq!(HighlightEndpoint::new().serialize(&mut ctx).unwrap(), None);
}
