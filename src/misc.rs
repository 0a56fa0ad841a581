//! Miscellaneous helpers: string hashing, random strings, executable
//! probing, binomial coefficients, and name-based object lookup.

use std::collections::HashMap;
use std::process::{Command, Stdio};

use md5::{Digest, Md5};
use rand::Rng;

use crate::diag::DiagnosticSink;
use crate::error::{Result, UtilError};

/// MD5 hash of a string in hex, with non-ASCII characters stripped before
/// hashing.
pub fn md5_hex(input: &str) -> String {
    let sanitized: String = input.chars().filter(|c| c.is_ascii()).collect();
    hex::encode(Md5::digest(sanitized.as_bytes()))
}

/// Default character set for [`rand_str`]: A-Z plus digits
pub const DEFAULT_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A string of `len` random characters from [`DEFAULT_CHARSET`]
pub fn rand_str(len: usize) -> String {
    rand_str_from(len, DEFAULT_CHARSET)
}

/// A string of `len` random characters drawn uniformly from `charset`.
/// `charset` must be non-empty ASCII.
pub fn rand_str_from(len: usize, charset: &[u8]) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| charset[rng.gen_range(0..charset.len())] as char)
        .collect()
}

/// Check whether `name` can be spawned as a process. The probe is killed
/// immediately after a successful spawn.
pub fn is_executable(name: &str, diag: &dyn DiagnosticSink) -> bool {
    match Command::new(name)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(mut child) => {
            // The probe may have exited already; both results are fine.
            let _ = child.kill();
            let _ = child.wait();
            true
        }
        Err(err) => {
            diag.warn(&format!("'{name}' is not executable: {err}"));
            false
        }
    }
}

/// Exact binomial coefficient C(n, k); 0 when k > n.
pub fn binomial(n: u64, k: u64) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // Each partial product is divisible by i + 1
        result = result * (n - i) as u128 / (i + 1) as u128;
    }
    result
}

/// Objects addressable by dotted `module.object` paths.
///
/// Lookup failures distinguish an unknown module from a known module that
/// does not define the requested object.
#[derive(Debug, Clone, Default)]
pub struct Registry<T> {
    modules: HashMap<String, HashMap<String, T>>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    /// Register `value` under `module.object`
    pub fn register(&mut self, module: &str, object: &str, value: T) {
        self.modules
            .entry(module.to_owned())
            .or_default()
            .insert(object.to_owned(), value);
    }

    /// Resolve a dotted `module.object` path
    pub fn resolve(&self, path: &str) -> Result<&T> {
        let (module, object) = path
            .split_once('.')
            .ok_or_else(|| UtilError::UnknownModule(path.to_owned()))?;
        let objects = self
            .modules
            .get(module)
            .ok_or_else(|| UtilError::UnknownModule(module.to_owned()))?;
        objects.get(object).ok_or_else(|| UtilError::UnknownObject {
            module: module.to_owned(),
            object: object.to_owned(),
        })
    }
}
