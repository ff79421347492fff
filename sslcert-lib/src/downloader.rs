//! Certificate retrieval from live TLS endpoints.
//!
//! A blocking TCP connection is opened and a TLS handshake driven with
//! rustls; the peer's chain is then decoded. No application data is sent.

use crate::certificate::Certificate;
use crate::matcher;
use crate::SslCertError;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::client::WebPkiServerVerifier;
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{
    CertificateError, ClientConfig, ClientConnection, DigitallySignedStruct, Error as TlsError,
    RootCertStore, SignatureScheme,
};
use std::io::ErrorKind;
use std::net::{IpAddr, SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for fetching certificates.
///
/// ```no_run
/// use sslcert_lib::Downloader;
/// use std::time::Duration;
///
/// let cert = Downloader::new()
///     .using_port(8443)
///     .with_timeout(Duration::from_secs(5))
///     .for_host("example.com")?;
/// println!("{}", cert.domain());
/// # Ok::<(), sslcert_lib::SslCertError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Downloader {
    port: u16,
    timeout: Duration,
    verify_peer: bool,
    verify_peer_name: bool,
    sni: bool,
    ip_address: Option<IpAddr>,
    full_chain: bool,
}

impl Default for Downloader {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            verify_peer: true,
            verify_peer_name: true,
            sni: true,
            ip_address: None,
            full_chain: false,
        }
    }
}

impl Downloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Port used when the host string does not name one.
    pub fn using_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Applies to connecting and to each read/write during the handshake.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate the chain against the Mozilla root set (`webpki-roots`).
    pub fn with_verify_peer(mut self, verify: bool) -> Self {
        self.verify_peer = verify;
        self
    }

    /// Reject certificates that do not name the host. Ignored when peer
    /// verification is off.
    pub fn with_verify_peer_name(mut self, verify: bool) -> Self {
        self.verify_peer_name = verify;
        self
    }

    pub fn using_sni(mut self, sni: bool) -> Self {
        self.sni = sni;
        self
    }

    /// Connect to `ip` instead of resolving the host, still presenting the
    /// hostname for SNI and name verification.
    pub fn from_ip_address(mut self, ip: IpAddr) -> Self {
        self.ip_address = Some(ip);
        self
    }

    /// Return every certificate the peer sent from [`certificates`](Self::certificates).
    pub fn with_full_chain(mut self, full_chain: bool) -> Self {
        self.full_chain = full_chain;
        self
    }

    /// Fetch the leaf certificate of `host`.
    pub fn for_host(&self, host: &str) -> Result<Certificate, SslCertError> {
        let target = Target::parse(host, self.port)?;
        let (chain, remote) = self.fetch_chain(&target)?;
        let leaf = chain.first().ok_or_else(|| SslCertError::NoCertificates {
            host: target.host.clone(),
        })?;
        Certificate::decode(leaf.as_ref(), remote)
    }

    /// Fetch the peer's certificates, leaf first.
    ///
    /// Only the leaf is returned unless [`with_full_chain`](Self::with_full_chain) is set.
    pub fn certificates(&self, host: &str) -> Result<Vec<Certificate>, SslCertError> {
        let target = Target::parse(host, self.port)?;
        let (chain, remote) = self.fetch_chain(&target)?;
        if chain.is_empty() {
            return Err(SslCertError::NoCertificates { host: target.host });
        }

        let take = if self.full_chain { chain.len() } else { 1 };
        chain
            .iter()
            .take(take)
            .map(|der| Certificate::decode(der.as_ref(), remote.clone()))
            .collect()
    }

    fn fetch_chain(
        &self,
        target: &Target,
    ) -> Result<(Vec<CertificateDer<'static>>, String), SslCertError> {
        let config = self.client_config()?;
        let server_name = ServerName::try_from(target.host.clone())
            .map_err(|_| SslCertError::InvalidHost(target.host.clone()))?;

        let mut socket = self.connect(target)?;
        let remote = remote_address(&socket);

        let mut conn = ClientConnection::new(config, server_name)
            .map_err(|e| connection_error(&target.host, e))?;

        while conn.is_handshaking() {
            conn.complete_io(&mut socket)
                .map_err(|e| io_error(&target.host, e))?;
        }

        let chain: Vec<CertificateDer<'static>> = conn
            .peer_certificates()
            .map(|certs| certs.iter().map(|c| c.clone().into_owned()).collect())
            .unwrap_or_default();

        tracing::debug!(
            host = %target.host,
            remote = %remote,
            protocol = ?conn.protocol_version(),
            chain_len = chain.len(),
            "handshake complete"
        );

        // Best effort; the chain is already in hand.
        conn.send_close_notify();
        let _ = conn.complete_io(&mut socket);

        Ok((chain, remote))
    }

    fn connect(&self, target: &Target) -> Result<TcpStream, SslCertError> {
        let addrs: Vec<SocketAddr> = match self.ip_address {
            Some(ip) => vec![SocketAddr::new(ip, target.port)],
            None => (target.host.as_str(), target.port)
                .to_socket_addrs()
                .map_err(|e| io_error(&target.host, e))?
                .collect(),
        };

        let mut last_err = None;
        for addr in addrs {
            tracing::debug!(host = %target.host, %addr, "connecting");
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(socket) => {
                    socket.set_read_timeout(Some(self.timeout))?;
                    socket.set_write_timeout(Some(self.timeout))?;
                    return Ok(socket);
                }
                Err(e) => {
                    tracing::debug!(%addr, error = %e, "connect failed");
                    last_err = Some(e);
                }
            }
        }

        Err(match last_err {
            Some(e) => io_error(&target.host, e),
            None => SslCertError::Connection {
                host: target.host.clone(),
                message: "no addresses resolved".into(),
            },
        })
    }

    fn client_config(&self) -> Result<Arc<ClientConfig>, SslCertError> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());

        let verifier: Arc<dyn ServerCertVerifier> = if self.verify_peer {
            let roots = RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
            let webpki =
                WebPkiServerVerifier::builder_with_provider(Arc::new(roots), provider.clone())
                    .build()
                    .map_err(|e| SslCertError::Unsupported(format!("TLS verifier: {}", e)))?;
            if self.verify_peer_name {
                webpki
            } else {
                Arc::new(IgnoreNameMismatch { inner: webpki })
            }
        } else {
            tracing::debug!("peer verification disabled");
            Arc::new(AcceptAnyCertificate {
                provider: provider.clone(),
            })
        };

        let mut config = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .map_err(|e| SslCertError::Unsupported(format!("TLS configuration: {}", e)))?
            .dangerous()
            .with_custom_certificate_verifier(verifier)
            .with_no_client_auth();
        config.enable_sni = self.sni;

        Ok(Arc::new(config))
    }
}

/// Host and port to connect to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    host: String,
    port: u16,
}

impl Target {
    /// Accepts a hostname, `host:port`, an IP literal, or a URL.
    ///
    /// A port spelled out in the input wins over `default_port`.
    fn parse(input: &str, default_port: u16) -> Result<Self, SslCertError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SslCertError::InvalidHost(input.to_string()));
        }

        if let Ok(ip) = input.parse::<IpAddr>() {
            return Ok(Self {
                host: ip.to_string(),
                port: default_port,
            });
        }

        let url = matcher::parse_url(input)
            .ok_or_else(|| SslCertError::InvalidHost(input.to_string()))?;
        let host =
            matcher::url_host(&url).ok_or_else(|| SslCertError::InvalidHost(input.to_string()))?;

        Ok(Self {
            host,
            port: url.port().unwrap_or(default_port),
        })
    }
}

/// Peer address as `ip:port` (IPv6 bracketed), or empty when unknown.
fn remote_address(socket: &TcpStream) -> String {
    socket
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_default()
}

fn io_error(host: &str, err: std::io::Error) -> SslCertError {
    match err.kind() {
        ErrorKind::TimedOut | ErrorKind::WouldBlock => SslCertError::Timeout {
            host: host.to_string(),
        },
        _ => connection_error(host, err),
    }
}

fn connection_error(host: &str, err: impl std::fmt::Display) -> SslCertError {
    SslCertError::Connection {
        host: host.to_string(),
        message: err.to_string(),
    }
}

/// Accepts any chain while still checking handshake signatures.
#[derive(Debug)]
struct AcceptAnyCertificate {
    provider: Arc<CryptoProvider>,
}

impl ServerCertVerifier for AcceptAnyCertificate {
    fn verify_server_cert(
        &self,
        _: &CertificateDer<'_>,
        _: &[CertificateDer<'_>],
        _: &ServerName<'_>,
        _: &[u8],
        _: UnixTime,
    ) -> Result<ServerCertVerified, TlsError> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        rustls::crypto::verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        rustls::crypto::verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}

/// Full chain validation that tolerates a certificate not naming the host.
#[derive(Debug)]
struct IgnoreNameMismatch {
    inner: Arc<WebPkiServerVerifier>,
}

impl ServerCertVerifier for IgnoreNameMismatch {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        ocsp_response: &[u8],
        now: UnixTime,
    ) -> Result<ServerCertVerified, TlsError> {
        match self
            .inner
            .verify_server_cert(end_entity, intermediates, server_name, ocsp_response, now)
        {
            Err(TlsError::InvalidCertificate(
                CertificateError::NotValidForName | CertificateError::NotValidForNameContext { .. },
            )) => Ok(ServerCertVerified::assertion()),
            other => other,
        }
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        self.inner.verify_tls12_signature(message, cert, dss)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        self.inner.verify_tls13_signature(message, cert, dss)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.inner.supported_verify_schemes()
    }
}
