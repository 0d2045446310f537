use market_core::{Address, HostInvocation, TransactionBody, UnsignedEnvelope};
use market_wallets::key_pair::verify;
use market_wallets::*;

const PASSPHRASE: &str = "Test SDF Network ; September 2015";

fn envelope(source: Address) -> UnsignedEnvelope {
    UnsignedEnvelope::new(&TransactionBody {
        source,
        sequence: 12,
        fee: 100,
        valid_until: 0,
        invocation: HostInvocation {
            contract: Address::contract([5; 32]),
            method: "award_item".into(),
            args: vec![source.into()],
        },
        resources: None,
    })
    .unwrap()
}

#[tokio::test]
async fn approved_request_is_signed_by_wallet_key() {
    let key = KeyPair::generate();
    let identity = key.address();
    let (bridge, mut requests) = WalletBridge::channel(PASSPHRASE, 4);

    let wallet = tokio::spawn(async move {
        let request = requests.recv().await.unwrap();
        assert_eq!(request.context().identity, key.address());
        request.approve(&key);
    });

    let ctx = SigningContext::new(identity, PASSPHRASE);
    let unsigned = envelope(identity);
    let hash = unsigned.hash(&ctx.network);
    let signed = bridge.sign(unsigned, &ctx).await.unwrap();
    wallet.await.unwrap();

    assert_eq!(signed.signatures().len(), 1);
    assert!(verify(&identity, &hash, &signed.signatures()[0]));
}

#[tokio::test]
async fn rejected_request_reports_rejection() {
    let identity = Address::account([1; 32]);
    let (bridge, mut requests) = WalletBridge::channel(PASSPHRASE, 4);
    tokio::spawn(async move {
        requests.recv().await.unwrap().reject();
    });

    let ctx = SigningContext::new(identity, PASSPHRASE);
    assert_eq!(
        bridge.sign(envelope(identity), &ctx).await.unwrap_err(),
        SignerError::Rejected
    );
}

#[tokio::test]
async fn dropped_request_is_unavailable() {
    let identity = Address::account([1; 32]);
    let (bridge, mut requests) = WalletBridge::channel(PASSPHRASE, 4);
    tokio::spawn(async move {
        drop(requests.recv().await);
    });

    let ctx = SigningContext::new(identity, PASSPHRASE);
    assert!(matches!(
        bridge.sign(envelope(identity), &ctx).await,
        Err(SignerError::Unavailable(_))
    ));
}

#[tokio::test]
async fn closed_wallet_is_unavailable() {
    let identity = Address::account([1; 32]);
    let (bridge, requests) = WalletBridge::channel(PASSPHRASE, 4);
    drop(requests);

    let ctx = SigningContext::new(identity, PASSPHRASE);
    assert!(matches!(
        bridge.sign(envelope(identity), &ctx).await,
        Err(SignerError::Unavailable(_))
    ));
}

#[tokio::test]
async fn wallet_on_other_network_is_refused_without_prompt() {
    let identity = Address::account([1; 32]);
    let (bridge, mut requests) = WalletBridge::channel(PASSPHRASE, 4);
    bridge.set_wallet_network("Public Global Stellar Network ; September 2015");

    let ctx = SigningContext::new(identity, PASSPHRASE);
    let err = bridge.sign(envelope(identity), &ctx).await.unwrap_err();
    assert!(matches!(err, SignerError::NetworkMismatch { .. }));
    assert!(requests.try_recv().is_err());
}

#[tokio::test]
async fn approving_with_wrong_key_is_unavailable() {
    let identity = Address::account([1; 32]);
    let (bridge, mut requests) = WalletBridge::channel(PASSPHRASE, 4);
    tokio::spawn(async move {
        requests.recv().await.unwrap().approve(&KeyPair::generate());
    });

    let ctx = SigningContext::new(identity, PASSPHRASE);
    assert!(matches!(
        bridge.sign(envelope(identity), &ctx).await,
        Err(SignerError::Unavailable(_))
    ));
}
