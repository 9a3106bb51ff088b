//! Shared fixtures for the integration suites: a routing mock gateway, a
//! fake compiler and base-bundle builders.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use modelpress::compiler::{CompilerError, SourceCompiler};
use modelpress::http::{GatewayError, HttpGateway, HttpRequest, HttpResponse};
use modelpress::ModelpressConfig;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Routes stubbed (method, url) pairs to canned responses and records every
/// request. Clones share state, so one clone can be handed to the publisher
/// while the test keeps another for assertions.
#[derive(Clone, Default)]
pub struct MockGateway {
    responses: Arc<Mutex<HashMap<(String, String), (u16, Vec<u8>)>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stub(&self, method: &str, url: &str, status: u16, body: &str) {
        self.responses.lock().unwrap().insert(
            (method.to_string(), url.to_string()),
            (status, body.as_bytes().to_vec()),
        );
    }

    pub fn stub_bytes(&self, method: &str, url: &str, status: u16, body: &[u8]) {
        self.responses.lock().unwrap().insert(
            (method.to_string(), url.to_string()),
            (status, body.to_vec()),
        );
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

impl HttpGateway for MockGateway {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, GatewayError> {
        let key = (request.method.as_str().to_string(), request.url.clone());
        self.requests.lock().unwrap().push(request);
        match self.responses.lock().unwrap().get(&key) {
            Some((status, body)) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            None => Err(GatewayError::new(
                key.1,
                format!("no stubbed response for {} request", key.0),
            )),
        }
    }
}

/// Stands in for the toolchain compiler: emits one class artifact named
/// after the source file.
pub struct FakeCompiler;

impl SourceCompiler for FakeCompiler {
    fn compile(
        &self,
        source: &Path,
        classpath: &Path,
        target_dir: &Path,
    ) -> Result<(), CompilerError> {
        for input in [source, classpath] {
            if !input.exists() {
                return Err(CompilerError::Diagnostics {
                    diagnostics: format!("error: file not found: {}", input.display()),
                });
            }
        }
        let stem = source
            .file_stem()
            .expect("source has a file name")
            .to_string_lossy();
        fs::write(
            target_dir.join(format!("{stem}.class")),
            [0xCAu8, 0xFE, 0xBA, 0xBE].as_slice(),
        )
        .expect("class artifact is writable");
        Ok(())
    }
}

/// Writes a small base runtime bundle and returns its entry names in order.
pub fn write_base_bundle(path: &Path) -> Vec<String> {
    let mut writer = ZipWriter::new(File::create(path).expect("base bundle is creatable"));
    writer
        .start_file(
            "META-INF/MANIFEST.MF",
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        )
        .unwrap();
    writer.write_all(b"Manifest-Version: 1.0\n").unwrap();
    writer
        .start_file(
            "application.properties",
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        )
        .unwrap();
    writer.write_all(b"server.port=8080\n").unwrap();
    writer.finish().unwrap();
    vec![
        "META-INF/MANIFEST.MF".to_string(),
        "application.properties".to_string(),
    ]
}

pub fn test_config(base_bundle: PathBuf, working_dir: PathBuf) -> ModelpressConfig {
    ModelpressConfig {
        platform_api_url: "http://api.test".to_string(),
        platform_token: "platform-token".to_string(),
        space_guid: "space-1".to_string(),
        broker_url: "http://broker.test".to_string(),
        broker_username: "broker-user".to_string(),
        broker_password: "broker-pass".to_string(),
        base_bundle,
        working_dir,
        request_timeout_secs: 5,
        log_level: "info".to_string(),
    }
}

/// Stubs the two model-host downloads for `model_name`.
pub fn stub_model_host(gateway: &MockGateway, model_name: &str, source: &str) {
    gateway.stub(
        "GET",
        &format!("http://models.test/3/Models.java/{model_name}"),
        200,
        source,
    );
    gateway.stub_bytes(
        "GET",
        "http://models.test/3/h2o-genmodel.jar",
        200,
        b"genmodel-library-bytes",
    );
}
