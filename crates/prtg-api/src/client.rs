//! Asynchronous PRTG client implementation.
//!
//! Every operation is a single HTTP round trip: credentials and arguments go
//! out as query parameters, tabular responses come back as JSON, property and
//! status lookups come back as small XML documents. There is no retry,
//! caching, or pagination; failures surface directly to the caller.

use crate::auth::Credentials;
use crate::models::{Device, DeviceTable, Group, GroupTable, Icon, Probe, ProbeTable};
use crate::Result;
use prtg_core::config::PrtgClientConfig;
use prtg_core::query::QueryParams;
use prtg_core::{Error, ObjectId};
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = concat!("prtg-api/", env!("CARGO_PKG_VERSION"));

/// Columns requested for probe tables.
const PROBE_COLUMNS: &str =
    "objid,name,active,tags,parentid,priority,status,groupnum,devicenum,location";

/// Columns requested for group tables.
const GROUP_COLUMNS: &str =
    "objid,name,active,status,probe,priority,tags,location,parentid,groupnum,devicenum";

/// Columns requested for device tables.
const DEVICE_COLUMNS: &str =
    "objid,name,active,status,probe,group,host,priority,tags,location,parentid,icon";

/// Builder for [`PrtgClient`].
#[derive(Debug, Clone)]
pub struct PrtgClientBuilder {
    config: PrtgClientConfig,
    credentials: Credentials,
    user_agent: String,
}

impl PrtgClientBuilder {
    /// Create a builder from a configuration and credentials.
    #[must_use]
    pub fn new(config: PrtgClientConfig, credentials: Credentials) -> Self {
        Self {
            config,
            credentials,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Finalise the builder and create the [`PrtgClient`].
    pub fn build(self) -> Result<PrtgClient> {
        let base_url = self.config.parse_server_url()?;

        let mut builder = ClientBuilder::new()
            .user_agent(self.user_agent)
            .timeout(self.config.timeout())
            .connect_timeout(Duration::from_secs(10));

        if !self.config.tls_verify {
            warn!("TLS verification disabled for PRTG client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ca_cert) = &self.config.tls_ca_cert {
            debug!("loading PRTG CA certificate from {}", ca_cert.display());
            let bytes = std::fs::read(ca_cert).map_err(|err| {
                Error::ConfigError(format!(
                    "Failed to read PRTG CA certificate {}: {err}",
                    ca_cert.display()
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&bytes)
                .map_err(|err| Error::ConfigError(format!("Invalid PRTG CA certificate: {err}")))?;
            builder = builder.add_root_certificate(cert);
        }

        let http = builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build PRTG HTTP client: {err}")))?;

        Ok(PrtgClient {
            http,
            base_url,
            credentials: self.credentials,
        })
    }
}

/// Asynchronous client for the PRTG HTTP API.
///
/// The base URL and credentials are immutable for the client's lifetime. The
/// client is cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct PrtgClient {
    http: Client,
    base_url: Url,
    credentials: Credentials,
}

impl PrtgClient {
    /// Construct a client directly from configuration and credentials.
    pub fn new(config: PrtgClientConfig, credentials: Credentials) -> Result<Self> {
        PrtgClientBuilder::new(config, credentials).build()
    }

    /// Start a builder pre-populated with the provided configuration.
    #[must_use]
    pub fn builder(config: PrtgClientConfig, credentials: Credentials) -> PrtgClientBuilder {
        PrtgClientBuilder::new(config, credentials)
    }

    /// Construct a client and validate the credentials against the instance.
    ///
    /// This is the async counterpart of validating at construction time:
    /// invalid credentials surface as [`Error::Unauthorized`] before the
    /// client is handed out.
    pub async fn connect(config: PrtgClientConfig, credentials: Credentials) -> Result<Self> {
        let client = Self::new(config, credentials)?;
        client.check_credentials().await?;
        Ok(client)
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Validate the configured credentials via `/api/healthstatus.json`.
    pub async fn check_credentials(&self) -> Result<()> {
        self.get("api/healthstatus.json", QueryParams::new())
            .await
            .map(|_| ())
    }

    // Sensortree

    /// Fetch the sensortree as raw XML, optionally rooted at a group.
    pub async fn sensortree(&self, root: Option<ObjectId>) -> Result<String> {
        let mut params = QueryParams::new();
        params.push("content", "sensortree");
        params.push_opt("id", root);
        self.get_text("api/table.xml", params).await
    }

    // Probes

    /// Get all probes.
    pub async fn list_probes(&self) -> Result<Vec<Probe>> {
        self.probes(QueryParams::new()).await
    }

    /// Get one probe by id.
    pub async fn get_probe(&self, id: ObjectId) -> Result<Probe> {
        let mut extra = QueryParams::new();
        extra.push("filter_objid", id);
        self.probes(extra)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::ObjectNotFound("No probe with matching ID".to_string()))
    }

    /// Get one probe by exact name.
    pub async fn get_probe_by_name(&self, name: &str) -> Result<Probe> {
        let mut extra = QueryParams::new();
        extra.push("filter_name", name);
        let mut probes = self.probes(extra).await?;
        if probes.len() > 1 {
            return Err(Error::DuplicateObject(
                "Multiple probes with same name".to_string(),
            ));
        }
        probes
            .pop()
            .ok_or_else(|| Error::ObjectNotFound("No probe with matching name".to_string()))
    }

    async fn probes(&self, extra: QueryParams) -> Result<Vec<Probe>> {
        let mut params = QueryParams::new();
        params.push("content", "probes");
        // probes are always direct children of the root group
        params.push("filter_parentid", 0);
        params.push("columns", PROBE_COLUMNS);
        params.extend(extra);

        let table: ProbeTable = self.get_json("api/table.json", params).await?;
        Ok(table.probes)
    }

    // Groups

    /// Get all groups.
    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        self.groups(QueryParams::new()).await
    }

    /// Get groups whose name contains the given substring.
    pub async fn groups_by_name_containing(&self, name: &str) -> Result<Vec<Group>> {
        let mut extra = QueryParams::new();
        extra.push_substring("filter_name", name);
        self.groups(extra).await
    }

    /// Get one group by exact name.
    ///
    /// Names containing `[]` are known not to match; prefer
    /// [`groups_by_name_containing`](Self::groups_by_name_containing) for
    /// those.
    pub async fn get_group_by_name(&self, name: &str) -> Result<Group> {
        let mut extra = QueryParams::new();
        extra.push("filter_name", name);
        let mut groups = self.groups(extra).await?;
        if groups.len() > 1 {
            return Err(Error::DuplicateObject(
                "Multiple groups with same name".to_string(),
            ));
        }
        groups
            .pop()
            .ok_or_else(|| Error::ObjectNotFound("No group with matching name".to_string()))
    }

    /// Get one group by id.
    pub async fn get_group(&self, id: ObjectId) -> Result<Group> {
        let mut extra = QueryParams::new();
        extra.push("filter_objid", id);
        self.groups(extra)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::ObjectNotFound("No group with matching ID".to_string()))
    }

    /// Add a new group under a parent group.
    ///
    /// `addgroup2.htm` is not an official API endpoint and returns no usable
    /// response, so the created group is located by comparing name-matching
    /// queries before and after the call. Returns `None` when creation cannot
    /// be confirmed. Use the property setters to customise the group
    /// afterwards.
    pub async fn add_group(&self, name: &str, parent: ObjectId) -> Result<Option<Group>> {
        let before: HashSet<ObjectId> = self
            .groups_by_name_containing(name)
            .await?
            .iter()
            .map(|group| group.objid)
            .collect();

        let form = [("id", parent.to_string()), ("name_", name.to_string())];
        self.post_form("addgroup2.htm", QueryParams::new(), &form)
            .await?;

        let created = self
            .groups_by_name_containing(name)
            .await?
            .into_iter()
            .find(|group| !before.contains(&group.objid));
        Ok(created)
    }

    /// Clone an existing group into a parent group, returning the new id.
    pub async fn clone_group(
        &self,
        name: &str,
        parent: ObjectId,
        source: ObjectId,
    ) -> Result<ObjectId> {
        let mut params = QueryParams::new();
        params.push("id", source);
        params.push("name", name);
        params.push("targetid", parent);

        let response = self.get("api/duplicateobject.htm", params).await?;
        object_id_from_url(response.url())
    }

    // Devices

    /// Get all devices.
    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        self.devices(QueryParams::new()).await
    }

    /// Get the devices below a group.
    pub async fn devices_in_group(&self, group: ObjectId) -> Result<Vec<Device>> {
        let mut extra = QueryParams::new();
        extra.push("id", group);
        self.devices(extra).await
    }

    /// Get devices whose name contains the given substring.
    pub async fn devices_by_name_containing(&self, name: &str) -> Result<Vec<Device>> {
        let mut extra = QueryParams::new();
        extra.push_substring("filter_name", name);
        self.devices(extra).await
    }

    /// Get one device by exact name.
    pub async fn get_device_by_name(&self, name: &str) -> Result<Device> {
        let mut extra = QueryParams::new();
        extra.push("filter_name", name);
        let mut devices = self.devices(extra).await?;
        if devices.len() > 1 {
            return Err(Error::DuplicateObject(
                "Multiple devices with same name".to_string(),
            ));
        }
        devices
            .pop()
            .ok_or_else(|| Error::ObjectNotFound("No device with matching name".to_string()))
    }

    /// Get one device by id.
    pub async fn get_device(&self, id: ObjectId) -> Result<Device> {
        let mut extra = QueryParams::new();
        extra.push("filter_objid", id);
        self.devices(extra)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::ObjectNotFound("No device with matching ID".to_string()))
    }

    /// Add a new device under a group.
    ///
    /// Same caveats as [`add_group`](Self::add_group): the endpoint gives no
    /// usable response, so the created device is found by a before/after
    /// comparison and `None` means creation could not be confirmed.
    pub async fn add_device(
        &self,
        name: &str,
        host: &str,
        parent: ObjectId,
        icon: Icon,
    ) -> Result<Option<Device>> {
        let before: HashSet<ObjectId> = self
            .devices_by_name_containing(name)
            .await?
            .iter()
            .map(|device| device.objid)
            .collect();

        let form = [
            ("id", parent.to_string()),
            ("name_", name.to_string()),
            ("host_", host.to_string()),
            ("deviceicon_", icon.file_name().to_string()),
        ];
        self.post_form("adddevice2.htm", QueryParams::new(), &form)
            .await?;

        let created = self
            .devices_by_name_containing(name)
            .await?
            .into_iter()
            .find(|device| !before.contains(&device.objid));
        Ok(created)
    }

    /// Clone an existing device into a parent group, returning the new id.
    pub async fn clone_device(
        &self,
        name: &str,
        host: &str,
        parent: ObjectId,
        source: ObjectId,
    ) -> Result<ObjectId> {
        let mut params = QueryParams::new();
        params.push("id", source);
        params.push("name", name);
        params.push("host", host);
        params.push("targetid", parent);

        let response = self.get("api/duplicateobject.htm", params).await?;
        object_id_from_url(response.url())
    }

    /// The web UI URL of a device.
    pub fn device_url(&self, id: ObjectId) -> Result<Url> {
        let mut url = self.build_url("device.htm")?;
        url.query_pairs_mut().append_pair("id", &id.to_string());
        Ok(url)
    }

    // Object properties and status

    /// Read a single property of an object.
    pub async fn object_property(&self, id: ObjectId, property: &str) -> Result<String> {
        let mut params = QueryParams::new();
        params.push("id", id);
        params.push("name", property);
        params.push("show", "nohtmlencode");

        let text = self.get_text("api/getobjectproperty.htm", params).await?;
        parse_xml_result(&text)
    }

    /// Read a single status value of an object.
    pub async fn object_status(&self, id: ObjectId, name: &str) -> Result<String> {
        let mut params = QueryParams::new();
        params.push("id", id);
        params.push("name", name);
        params.push("show", "nohtmlencode");

        let text = self.get_text("api/getobjectstatus.htm", params).await?;
        parse_xml_result(&text)
    }

    /// Get the hostname of an object.
    pub async fn hostname(&self, id: ObjectId) -> Result<String> {
        self.object_property(id, "host").await
    }

    /// Get the service URL of an object.
    pub async fn service_url(&self, id: ObjectId) -> Result<String> {
        self.object_property(id, "serviceurl").await
    }

    /// Set a single property of an object.
    pub async fn set_object_property(&self, id: ObjectId, name: &str, value: &str) -> Result<()> {
        let mut params = QueryParams::new();
        params.push("id", id);
        params.push("name", name);
        params.push("value", value);

        self.get("api/setobjectproperty.htm", params)
            .await
            .map(|_| ())
    }

    /// Set the hostname of an object.
    pub async fn set_hostname(&self, id: ObjectId, host: &str) -> Result<()> {
        self.set_object_property(id, "host", host).await
    }

    /// Set the icon of a device.
    pub async fn set_icon(&self, id: ObjectId, icon: Icon) -> Result<()> {
        self.set_object_property(id, "deviceicon", icon.file_name())
            .await
    }

    /// Set the location of an object.
    pub async fn set_location(&self, id: ObjectId, location: &str) -> Result<()> {
        self.set_object_property(id, "location", location).await
    }

    /// Set the service URL of an object.
    pub async fn set_service_url(&self, id: ObjectId, url: &str) -> Result<()> {
        self.set_object_property(id, "serviceurl", url).await
    }

    /// Replace the tags of an object.
    ///
    /// PRTG treats every space-separated word as its own tag, so spaces
    /// inside a tag are replaced with `-` before joining.
    pub async fn set_tags(&self, id: ObjectId, tags: &[&str]) -> Result<()> {
        let combined = tags
            .iter()
            .map(|tag| tag.replace(' ', "-"))
            .collect::<Vec<_>>()
            .join(" ");
        self.set_object_property(id, "tags", &combined).await
    }

    /// Turn location inheritance of an object on or off.
    pub async fn set_inherit_location(&self, id: ObjectId, inherit: bool) -> Result<()> {
        let value = if inherit { "1" } else { "0" };
        self.set_object_property(id, "locationgroup_", value).await
    }

    // Actions

    /// Move an object into another group.
    pub async fn move_object(&self, id: ObjectId, target: ObjectId) -> Result<()> {
        let mut params = QueryParams::new();
        params.push("id", id);
        params.push("targetid", target);
        self.get("moveobjectnow.htm", params).await.map(|_| ())
    }

    /// Pause monitoring of an object.
    pub async fn pause_object(&self, id: ObjectId) -> Result<()> {
        let mut params = QueryParams::new();
        params.push("id", id);
        params.push("action", 0);
        self.get("api/pause.htm", params).await.map(|_| ())
    }

    /// Resume monitoring of an object.
    pub async fn resume_object(&self, id: ObjectId) -> Result<()> {
        let mut params = QueryParams::new();
        params.push("id", id);
        params.push("action", 1);
        self.get("api/pause.htm", params).await.map(|_| ())
    }

    /// Delete an object.
    pub async fn delete_object(&self, id: ObjectId) -> Result<()> {
        let mut params = QueryParams::new();
        params.push("id", id);
        params.push("approve", 1);
        self.get("api/deleteobject.htm", params).await.map(|_| ())
    }

    /// Set the priority of an object (1-5).
    pub async fn set_priority(&self, id: ObjectId, priority: u8) -> Result<()> {
        if !(1..=5).contains(&priority) {
            return Err(Error::InvalidRequest(
                "Priority can only be set between 1 and 5".to_string(),
            ));
        }
        let mut params = QueryParams::new();
        params.push("id", id);
        params.push("prio", priority);
        self.get("api/setpriority.htm", params).await.map(|_| ())
    }

    // Request plumbing

    async fn devices(&self, extra: QueryParams) -> Result<Vec<Device>> {
        let mut params = QueryParams::new();
        params.push("content", "devices");
        params.push("columns", DEVICE_COLUMNS);
        params.extend(extra);

        let table: DeviceTable = self.get_json("api/table.json", params).await?;
        Ok(table.devices)
    }

    async fn groups(&self, extra: QueryParams) -> Result<Vec<Group>> {
        let mut params = QueryParams::new();
        params.push("content", "groups");
        params.push("columns", GROUP_COLUMNS);
        params.extend(extra);

        let table: GroupTable = self.get_json("api/table.json", params).await?;
        Ok(table.groups)
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid PRTG path `{path}`: {err}")))
    }

    fn request_params(&self, params: QueryParams) -> QueryParams {
        let mut all = QueryParams::new();
        self.credentials.append_to(&mut all);
        all.extend(params);
        all
    }

    async fn get(&self, path: &str, params: QueryParams) -> Result<Response> {
        let url = self.build_url(path)?;
        let all = self.request_params(params);

        // params are not logged, they carry the credentials
        debug!(path, "sending PRTG request");

        let response = self.http.get(url).query(all.pairs()).send().await?;
        self.check_status(response).await
    }

    async fn post_form(
        &self,
        path: &str,
        params: QueryParams,
        form: &[(&str, String)],
    ) -> Result<Response> {
        let url = self.build_url(path)?;
        let all = self.request_params(params);

        debug!(path, "sending PRTG request");

        let response = self
            .http
            .post(url)
            .query(all.pairs())
            .form(form)
            .send()
            .await?;
        self.check_status(response).await
    }

    async fn get_json<T>(&self, path: &str, params: QueryParams) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.get(path, params).await?;
        response.json::<T>().await.map_err(|err| {
            Error::ParseError(format!("Failed to parse PRTG response for `{path}`: {err}"))
        })
    }

    async fn get_text(&self, path: &str, params: QueryParams) -> Result<String> {
        let response = self.get(path, params).await?;
        response.text().await.map_err(Error::from)
    }

    async fn check_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(match status {
            StatusCode::BAD_REQUEST => {
                Error::BadRequest(extract_xml_error(&message).unwrap_or(message))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Unauthorized(message),
            StatusCode::NOT_FOUND => Error::NotFound("Content not found".to_string()),
            status if status.is_server_error() => {
                Error::ServiceUnavailable(format!("PRTG server error {status}: {message}"))
            }
            _ => Error::HttpError(format!("PRTG error {status}: {message}")),
        })
    }
}

/// Extract the object id from the `id` query parameter of a redirect URL.
///
/// `duplicateobject.htm` reports the id of the clone only through the URL it
/// redirects to.
fn object_id_from_url(url: &Url) -> Result<ObjectId> {
    url.query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| ObjectId::parse_str(&value))
        .transpose()?
        .ok_or_else(|| Error::ParseError(format!("No object id in redirect URL `{url}`")))
}

/// Decode the `<result>` element of a PRTG XML response.
fn parse_xml_result(text: &str) -> Result<String> {
    #[derive(Deserialize)]
    struct XmlResult {
        result: String,
    }

    quick_xml::de::from_str::<XmlResult>(text)
        .map(|body| body.result)
        .map_err(|err| Error::ParseError(format!("Invalid XML result: {err}")))
}

/// Extract the `<error>` element PRTG puts in HTTP 400 bodies.
fn extract_xml_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct XmlError {
        error: String,
    }

    quick_xml::de::from_str::<XmlError>(body)
        .ok()
        .map(|body| body.error)
}
