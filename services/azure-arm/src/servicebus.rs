// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::constants::SERVICEBUS_API_VERSION;
use crate::ArmClient;
use azsample_core::Result;
use log::info;
use serde::{Deserialize, Serialize};

/// A Service Bus queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBusQueue {
    #[serde(default)]
    pub id: String,
    /// Queue name.
    pub name: String,
    #[serde(default)]
    pub properties: ServiceBusQueueProperties,
}

/// Properties of a Service Bus queue.
///
/// Unset values are omitted from create requests so the service applies
/// its defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBusQueueProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size_in_megabytes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_partitioning: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Serialize)]
struct CreateQueueBody<'a> {
    properties: &'a ServiceBusQueueProperties,
}

/// Client of `Microsoft.ServiceBus/namespaces/queues`.
///
/// - [Queues - Create Or Update](https://learn.microsoft.com/en-us/rest/api/servicebus/controlplane-stable/queues/create-or-update)
#[derive(Debug, Clone)]
pub struct ServiceBusQueuesClient {
    arm: ArmClient,
}

impl ServiceBusQueuesClient {
    /// Create a queues client on top of `arm`.
    pub fn new(arm: ArmClient) -> Self {
        Self { arm }
    }

    /// Create the queue, or update it when it already exists.
    pub async fn create_or_update(
        &self,
        resource_group: &str,
        namespace: &str,
        queue_name: &str,
        properties: &ServiceBusQueueProperties,
    ) -> Result<ServiceBusQueue> {
        let url = self.arm.resource_group_url(
            resource_group,
            &[
                "providers",
                "Microsoft.ServiceBus",
                "namespaces",
                namespace,
                "queues",
                queue_name,
            ],
            SERVICEBUS_API_VERSION,
        );

        let queue: ServiceBusQueue = self.arm.put(&url, &CreateQueueBody { properties }).await?;
        info!("created or updated queue {} in {namespace}", queue.name);
        Ok(queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{test_signer, MockHttpSend};
    use http::Method;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_create_queue() {
        let http = MockHttpSend::new();
        http.on(
            Method::PUT,
            "/namespaces/bus/queues/orders",
            200,
            r#"{"id":"/subscriptions/sub/resourceGroups/rg/providers/Microsoft.ServiceBus/namespaces/bus/queues/orders",
                "name":"orders","type":"Microsoft.ServiceBus/Namespaces/Queues",
                "properties":{"maxSizeInMegabytes":1024,"enablePartitioning":false,"messageCount":0,"status":"Active"}}"#,
        );
        let client = ServiceBusQueuesClient::new(ArmClient::new(test_signer(&http), "sub"));

        let queue = client
            .create_or_update("rg", "bus", "orders", &ServiceBusQueueProperties::default())
            .await
            .unwrap();
        assert_eq!(queue.name, "orders");
        assert_eq!(queue.properties.status.as_deref(), Some("Active"));

        let req = http.arm_requests().pop().unwrap();
        assert_eq!(req.method, Method::PUT);
        assert_eq!(
            req.uri,
            "https://management.azure.com/subscriptions/sub/resourceGroups/rg/providers/Microsoft.ServiceBus/namespaces/bus/queues/orders?api-version=2017-04-01"
        );
        assert_eq!(req.body, r#"{"properties":{}}"#);
    }

    #[tokio::test]
    async fn test_create_partitioned_queue() {
        let http = MockHttpSend::new();
        http.on(Method::PUT, "/queues/orders", 201, r#"{"name":"orders"}"#);
        let client = ServiceBusQueuesClient::new(ArmClient::new(test_signer(&http), "sub"));

        let properties = ServiceBusQueueProperties {
            enable_partitioning: Some(true),
            ..Default::default()
        };
        client
            .create_or_update("rg", "bus", "orders", &properties)
            .await
            .unwrap();

        let req = http.arm_requests().pop().unwrap();
        assert_eq!(req.body, r#"{"properties":{"enablePartitioning":true}}"#);
    }
}
