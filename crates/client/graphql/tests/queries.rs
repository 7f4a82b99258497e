//! End-to-end executor tests against the in-memory dev chain.

use ec_chain::{devnet_block_hash, devnet_coinbase, devnet_tx_hash, ChainQuery, MemoryChain};
use ec_graphql::{Deadline, QueryResult, SchemaBinding};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Duration;

fn binding(chain: MemoryChain) -> SchemaBinding {
    let chain: Arc<dyn ChainQuery> = Arc::new(chain);
    SchemaBinding::new(chain)
}

fn exec(binding: &SchemaBinding, query: &str) -> QueryResult {
    binding.execute(query, None, None, Deadline::none())
}

fn vars(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

#[test]
fn block_defaults_to_latest() {
    let b = binding(MemoryChain::devnet(6));
    let result = exec(&b, "{ block { number hash } }");
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.data["block"]["number"], json!("6"));
    assert_eq!(result.data["block"]["hash"], json!(devnet_block_hash(6).to_string()));
}

#[test]
fn block_hash_takes_precedence_over_number() {
    let b = binding(MemoryChain::devnet(6));
    let query = format!("{{ block(number: 5, hash: \"{}\") {{ number }} }}", devnet_block_hash(2));
    let result = exec(&b, &query);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.data["block"]["number"], json!("2"));
}

#[test]
fn missing_block_resolves_to_null_without_error() {
    let b = binding(MemoryChain::devnet(3));
    let result = exec(&b, "{ block(number: 99) { number } }");
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.data["block"], Value::Null);
}

#[test]
fn blocks_range_reports_holes_as_null_entries() {
    let mut chain = MemoryChain::devnet(5);
    chain.remove_block(2);
    let b = binding(chain);
    let result = exec(&b, "{ blocks(from: 1, to: 3) { number } }");
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(
        result.data["blocks"],
        json!([{ "number": "1" }, Value::Null, { "number": "3" }])
    );
}

#[test]
fn blocks_to_defaults_to_head() {
    let b = binding(MemoryChain::devnet(4));
    let result = exec(&b, "{ blocks(from: 3) { number } }");
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.data["blocks"], json!([{ "number": "3" }, { "number": "4" }]));
}

#[test]
fn inverted_block_range_is_a_field_error() {
    let b = binding(MemoryChain::devnet(4));
    let result = exec(&b, "{ blocks(from: 3, to: 1) { number } }");
    assert_eq!(result.data["blocks"], Value::Null);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        result.errors[0]["message"],
        json!("invalid argument: invalid block range: from (3) is higher than to (1)")
    );
    assert_eq!(result.errors[0]["path"], json!(["blocks"]));
}

#[test]
fn failed_field_does_not_abort_its_siblings() {
    let b = binding(MemoryChain::devnet(4));
    let result = exec(&b, "{ blocks(from: 3, to: 1) { number } block { number } }");
    assert_eq!(result.data["blocks"], Value::Null);
    assert_eq!(result.data["block"]["number"], json!("4"));
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn aliases_name_the_response_keys() {
    let b = binding(MemoryChain::devnet(4));
    let result = exec(&b, "{ a: block(number: 1) { n: number } b: block(number: 2) { number } }");
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.data, json!({ "a": { "n": "1" }, "b": { "number": "2" } }));
}

#[test]
fn variables_are_coerced_through_the_scalar_codecs() {
    let b = binding(MemoryChain::devnet(4));
    let variables = vars(&[("h", json!(devnet_block_hash(3).to_string()))]);
    let result = b.execute(
        "query($h: Bytes32!) { block(hash: $h) { number } }",
        Some(&variables),
        None,
        Deadline::none(),
    );
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.data["block"]["number"], json!("3"));
}

#[test]
fn long_variable_accepts_a_json_integer() {
    let b = binding(MemoryChain::devnet(4));
    let variables = vars(&[("n", json!(2))]);
    let result = b.execute(
        "query($n: Long) { block(number: $n) { number } }",
        Some(&variables),
        None,
        Deadline::none(),
    );
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.data["block"]["number"], json!("2"));
}

#[test]
fn malformed_variable_is_a_field_error() {
    let b = binding(MemoryChain::devnet(4));
    let variables = vars(&[("h", json!("0xdeadbeef"))]);
    let result = b.execute(
        "query($h: Bytes32) { block(hash: $h) { number } }",
        Some(&variables),
        None,
        Deadline::none(),
    );
    assert_eq!(result.data["block"], Value::Null);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0]["path"], json!(["block"]));
}

#[test]
fn null_variable_drops_an_optional_argument() {
    let b = binding(MemoryChain::devnet(4));
    let variables = vars(&[("n", Value::Null)]);
    let result = b.execute(
        "query($n: Long) { block(number: $n) { number } }",
        Some(&variables),
        None,
        Deadline::none(),
    );
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.data["block"]["number"], json!("4"));
}

#[test]
fn missing_required_argument_is_rejected() {
    let b = binding(MemoryChain::devnet(4));
    let result = exec(&b, "{ transaction { hash } }");
    assert_eq!(result.data["transaction"], Value::Null);
    assert_eq!(
        result.errors[0]["message"],
        json!("invalid argument: missing required argument 'hash'")
    );
}

#[test]
fn unknown_argument_is_rejected() {
    let b = binding(MemoryChain::devnet(4));
    let result = exec(&b, "{ block(numero: 1) { number } }");
    assert_eq!(result.data["block"], Value::Null);
    assert_eq!(
        result.errors[0]["message"],
        json!("invalid argument: unknown argument 'numero' on field 'block'")
    );
}

#[test]
fn integer_literal_is_rejected_for_non_long_scalars() {
    let b = binding(MemoryChain::devnet(4));
    let result = exec(&b, "{ block(hash: 5) { number } }");
    assert_eq!(result.data["block"], Value::Null);
    assert_eq!(result.errors.len(), 1);
    let message = result.errors[0]["message"].as_str().unwrap();
    assert!(message.contains("Bytes32"), "{message}");
    assert!(message.contains("IntValue"), "{message}");
}

#[test]
fn object_field_requires_a_sub_selection() {
    let b = binding(MemoryChain::devnet(4));
    let result = exec(&b, "{ block }");
    assert_eq!(result.data["block"], Value::Null);
    assert_eq!(
        result.errors[0]["message"],
        json!("field 'block' of type 'Block' must have a selection of subfields")
    );
}

#[test]
fn unknown_field_is_reported_with_its_path() {
    let b = binding(MemoryChain::devnet(4));
    let result = exec(&b, "{ block { number bogus } }");
    assert_eq!(result.data["block"]["number"], json!("4"));
    assert_eq!(result.data["block"]["bogus"], Value::Null);
    assert_eq!(result.errors[0]["message"], json!("cannot query field 'bogus' on type 'Block'"));
    assert_eq!(result.errors[0]["path"], json!(["block", "bogus"]));
}

#[test]
fn parse_failure_yields_null_data() {
    let b = binding(MemoryChain::devnet(4));
    let result = exec(&b, "{ block { ");
    assert_eq!(result.data, Value::Null);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0]["message"].as_str().unwrap().starts_with("query parse error"));
}

#[test]
fn mutations_are_rejected() {
    let b = binding(MemoryChain::devnet(4));
    let result = exec(&b, "mutation { sendTransaction }");
    assert_eq!(result.data, Value::Null);
    assert_eq!(result.errors[0]["message"], json!("mutations are not supported"));
}

#[test]
fn operation_name_selects_among_named_queries() {
    let b = binding(MemoryChain::devnet(4));
    let query = "query One { block(number: 1) { number } } query Two { block(number: 2) { number } }";
    let result = b.execute(query, None, Some("Two"), Deadline::none());
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.data["block"]["number"], json!("2"));

    let result = b.execute(query, None, None, Deadline::none());
    assert_eq!(result.data, Value::Null);
    assert_eq!(
        result.errors[0]["message"],
        json!("operationName is required when the document contains multiple operations")
    );

    let result = b.execute(query, None, Some("Three"), Deadline::none());
    assert_eq!(result.errors[0]["message"], json!("unknown operation 'Three'"));
}

#[test]
fn fragments_are_rejected() {
    let b = binding(MemoryChain::devnet(4));
    let result = exec(&b, "{ block { ...f } } fragment f on Block { number }");
    assert_eq!(result.errors[0]["message"], json!("fragments are not supported"));
}

#[test]
fn transaction_fields_and_block_linkage() {
    let b = binding(MemoryChain::devnet(4));
    let query = format!(
        "{{ transaction(hash: \"{}\") {{ hash from to value gasPrice gas inputData index block {{ number }} }} }}",
        devnet_tx_hash(2)
    );
    let result = exec(&b, &query);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    let tx = &result.data["transaction"];
    assert_eq!(tx["hash"], json!(devnet_tx_hash(2).to_string()));
    assert_eq!(tx["from"], json!(devnet_coinbase(1).to_string()));
    assert_eq!(tx["to"], json!(devnet_coinbase(2).to_string()));
    assert_eq!(tx["value"], json!("2000000000"));
    assert_eq!(tx["gasPrice"], json!("1000000000"));
    assert_eq!(tx["gas"], json!("21000"));
    assert_eq!(tx["inputData"], json!("0x"));
    assert_eq!(tx["index"], json!("0"));
    assert_eq!(tx["block"]["number"], json!("2"));
}

#[test]
fn pending_transaction_is_found_after_confirmed_history() {
    let mut chain = MemoryChain::devnet(2);
    let hash = devnet_tx_hash(42);
    chain.insert_pending(ec_chain::TransactionInfo {
        hash,
        nonce: 7,
        from: devnet_coinbase(1),
        to: None,
        value: 0u64.into(),
        gas_price: 1u64.into(),
        gas: 53_000,
        input: ep_types::Bytes(vec![0x60, 0x60]),
        block_hash: None,
        block_number: None,
        index: None,
    });
    let b = binding(chain);
    let query = format!("{{ transaction(hash: \"{hash}\") {{ to index inputData block {{ number }} }} }}");
    let result = exec(&b, &query);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    let tx = &result.data["transaction"];
    assert_eq!(tx["to"], Value::Null);
    assert_eq!(tx["index"], Value::Null);
    assert_eq!(tx["inputData"], json!("0x6060"));
    assert_eq!(tx["block"], Value::Null);
}

#[test]
fn block_transactions_and_count() {
    let b = binding(MemoryChain::devnet(3));
    let result = exec(&b, "{ block(number: 3) { transactionCount transactions { hash index } } }");
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.data["block"]["transactionCount"], json!("1"));
    assert_eq!(
        result.data["block"]["transactions"],
        json!([{ "hash": devnet_tx_hash(3).to_string(), "index": "0" }])
    );
}

#[test]
fn genesis_parent_is_null() {
    let b = binding(MemoryChain::devnet(2));
    let result = exec(&b, "{ block(number: 2) { parent { number parent { number parent { number } } } } }");
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.data["block"]["parent"]["number"], json!("1"));
    assert_eq!(result.data["block"]["parent"]["parent"]["number"], json!("0"));
    assert_eq!(result.data["block"]["parent"]["parent"]["parent"], Value::Null);
}

#[test]
fn miner_account_is_joined_at_block_height() {
    let b = binding(MemoryChain::devnet(3));
    let result = exec(&b, "{ block(number: 3) { miner { address balance transactionCount } } }");
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    let miner = &result.data["block"]["miner"];
    assert_eq!(miner["address"], json!(devnet_coinbase(3).to_string()));
    assert_eq!(miner["balance"], json!("2000000000000000000"));
    assert_eq!(miner["transactionCount"], json!("3"));
}

#[test]
fn unknown_account_defaults_to_zero_state() {
    let b = binding(MemoryChain::devnet(2));
    let result = exec(
        &b,
        "{ block { account(address: \"0x0000000000000000000000000000000000000001\") { balance transactionCount code } } }",
    );
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    let account = &result.data["block"]["account"];
    assert_eq!(account["balance"], json!("0"));
    assert_eq!(account["transactionCount"], json!("0"));
    assert_eq!(account["code"], json!("0x"));
}

#[test]
fn account_storage_echoes_the_requested_slot() {
    let b = binding(MemoryChain::devnet(2));
    let slot = "0x00000000000000000000000000000000000000000000000000000000000000aa";
    let query = format!(
        "{{ block {{ account(address: \"{}\") {{ storage(slot: \"{slot}\") }} }} }}",
        devnet_coinbase(1)
    );
    let result = exec(&b, &query);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.data["block"]["account"]["storage"], json!(slot));
}

#[test]
fn expired_deadline_stops_the_walk() {
    let b = binding(MemoryChain::devnet(4));
    let result = b.execute("{ block { number } blocks(from: 0) { number } }", None, None, Deadline::after(Duration::ZERO));
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0]["message"], json!("execution deadline exceeded"));
    // Nothing after the cutoff gets a response key.
    assert_eq!(result.data, json!({}));
}
