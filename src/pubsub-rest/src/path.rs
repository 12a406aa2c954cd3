// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Validates resource names and formats them as REST path segments.

use crate::Result;
use crate::error::Error;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

// Characters allowed unescaped in a path segment, beyond alphanumerics.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Formats `projects/{project}` as a path.
pub(crate) fn project(name: &str) -> Result<String> {
    match name.split('/').collect::<Vec<_>>().as_slice() {
        ["projects", project] if !project.is_empty() => Ok(format!("projects/{}", enc(project))),
        _ => Err(mismatch("project", name, "projects/*")),
    }
}

/// Formats `projects/{project}/topics/{topic}` as a path.
pub(crate) fn topic(name: &str) -> Result<String> {
    resource(name, "topics").ok_or_else(|| mismatch("topic", name, "projects/*/topics/*"))
}

/// Formats `projects/{project}/subscriptions/{subscription}` as a path.
pub(crate) fn subscription(name: &str) -> Result<String> {
    resource(name, "subscriptions")
        .ok_or_else(|| mismatch("subscription", name, "projects/*/subscriptions/*"))
}

fn resource(name: &str, collection: &str) -> Option<String> {
    match name.split('/').collect::<Vec<_>>().as_slice() {
        ["projects", project, c, id]
            if *c == collection && !project.is_empty() && !id.is_empty() =>
        {
            Some(format!("projects/{}/{collection}/{}", enc(project), enc(id)))
        }
        _ => None,
    }
}

fn enc(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

fn mismatch(field: &str, value: &str, template: &str) -> Error {
    Error::binding(format!(
        "the {field} name `{value}` does not match the template `{template}`"
    ))
}
