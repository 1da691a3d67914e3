use std::sync::Arc;

use hyper::Client;
use hyper::client::HttpConnector;
use hyper_rustls::HttpsConnector;
use rustls::{ClientConfig, OwnedTrustAnchor, RootCertStore};
use webpki_roots::TLS_SERVER_ROOTS;

pub(crate) type HttpsClient = Client<HttpsConnector<HttpConnector>, hyper::Body>;

/// Builds the shared HTTPS client used for generation requests and startup
/// dataset fetches. Plain-HTTP endpoints stay reachable for local workers.
pub(crate) fn build_client() -> HttpsClient {
    let mut roots = RootCertStore::empty();
    roots.add_trust_anchors(TLS_SERVER_ROOTS.iter().map(|anchor| {
        OwnedTrustAnchor::from_subject_spki_name_constraints(
            anchor.subject,
            anchor.spki,
            anchor.name_constraints,
        )
    }));

    let tls = ClientConfig::builder()
        .with_safe_defaults()
        .with_root_certificates(roots)
        .with_no_client_auth();

    let mut http = HttpConnector::new();
    http.enforce_http(false);

    Client::builder().build(HttpsConnector::from((http, Arc::new(tls))))
}
