#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

//! Wire-format vectors: documents as a Go payd wallet actually emits them.

use paybridge_core::protocol::{Envelope, Payment, PaymentAck, PaymentTerms};

#[test]
fn payment_terms_document_decodes() {
    let doc = r#"{
        "network": "mainnet",
        "version": "1.0",
        "creationTimestamp": 1648163657,
        "expirationTimestamp": 1648250057,
        "paymentUrl": "http://localhost:8445/api/v1/payment/abc123",
        "memo": "invoice number abc123",
        "beneficiary": {
            "name": "merchant",
            "email": "merchant@demo.example",
            "extendedData": { "paymentReference": "abc123" }
        },
        "modes": {
            "ef63d9775da5": {
                "choiceID0": {
                    "transactions": [
                        {
                            "outputs": {
                                "native": [
                                    {
                                        "amount": 100000,
                                        "script": "76a91455b61be43392125d127f1780fb038437cd67ef9c88ac",
                                        "description": "paymentReference abc123"
                                    }
                                ]
                            },
                            "policies": {
                                "fees": { "standard": { "satoshis": 100, "bytes": 200 } },
                                "SPVRequired": false,
                                "lockTime": 0
                            }
                        }
                    ]
                }
            }
        }
    }"#;

    let terms: PaymentTerms = serde_json::from_str(doc).unwrap();
    assert_eq!(terms.network, "mainnet");

    let txs = terms.choice_transactions().unwrap();
    assert_eq!(txs[0].outputs.native[0].amount, 100_000);
    let fees = txs[0].policies.as_ref().unwrap().fee_rate.as_ref().unwrap();
    assert_eq!(fees["standard"]["satoshis"], 100);

    // survives a round trip without losing the mode map
    let json = serde_json::to_string(&terms).unwrap();
    let back: PaymentTerms = serde_json::from_str(&json).unwrap();
    assert_eq!(back, terms);
}

#[test]
fn payment_document_decodes() {
    let doc = r#"{
        "modeId": "ef63d9775da5",
        "mode": {
            "optionId": "choiceID0",
            "transactions": ["0100000001abcdef"],
            "ancestors": {}
        },
        "originator": {
            "name": "payer",
            "paymail": "payer@demo.example",
            "avatar": ""
        },
        "memo": "thanks"
    }"#;

    let payment: Payment = serde_json::from_str(doc).unwrap();
    payment.validate().unwrap();
    assert_eq!(payment.mode.transactions.len(), 1);
    assert_eq!(
        payment.originator.as_ref().unwrap().paymail,
        "payer@demo.example"
    );
}

#[test]
fn payment_ack_rejection_decodes() {
    let doc = r#"{
        "modeId": "ef63d9775da5",
        "memo": "tx does not pay the requested outputs",
        "error": 1
    }"#;

    let ack: PaymentAck = serde_json::from_str(doc).unwrap();
    assert!(ack.rejected());
}

#[test]
fn envelope_frame_from_a_peer_decodes() {
    let frame = r#"{
        "key": "paymentterms.response",
        "appID": "dpp",
        "channelID": "abc123",
        "correlationID": "8d7e33a2-93c9-4bc7-8f3e-6a9f81c2b903",
        "body": { "network": "regtest", "version": "1.0",
                  "creationTimestamp": 1, "expirationTimestamp": 2,
                  "paymentUrl": "http://x", "modes": null }
    }"#;

    let env: Envelope = serde_json::from_str(frame).unwrap();
    assert_eq!(env.key, "paymentterms.response");
    assert_eq!(env.channel_id, "abc123");
    let terms: PaymentTerms = env.bind().unwrap();
    assert_eq!(terms.network, "regtest");
}
