// Copyright (c) 2026 task-maker developers
// SPDX-License-Identifier: AGPL-3.0

// gRPC transport to the coordinator
//
// Thin adapter from the generated tonic client to the application ports.
// The generated client is cheap to clone, so every call works on its own
// copy and the adapter can be shared behind `&self`.

use std::time::Duration;

use async_trait::async_trait;
use tonic::transport::{Channel, Endpoint};
use tonic::Status;

use crate::application::lifecycle::CoordinatorConnector;
use crate::application::session_controller::{CoordinatorClient, EventStream};
use crate::domain::endpoint::CoordinatorEndpoint;
use crate::domain::errors::ConnectError;
use crate::domain::session::EvaluationId;
use crate::proto::task_maker_manager_client::TaskMakerManagerClient;
use crate::proto::{CleanTaskRequest, EvaluateTaskRequest, StopRequest};

/// Connects over plaintext HTTP/2.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrpcConnector;

#[async_trait]
impl CoordinatorConnector for GrpcConnector {
    type Client = GrpcCoordinator;

    async fn connect(
        &self,
        endpoint: &CoordinatorEndpoint,
        timeout: Duration,
    ) -> Result<GrpcCoordinator, ConnectError> {
        let channel = Endpoint::from_shared(endpoint.uri())
            .map_err(|e| ConnectError::InvalidEndpoint(e.to_string()))?
            .connect_timeout(timeout);

        let channel = tokio::time::timeout(timeout, channel.connect())
            .await
            .map_err(|_| ConnectError::Timeout)?
            .map_err(|e| ConnectError::Refused(e.to_string()))?;

        Ok(GrpcCoordinator::new(channel))
    }
}

#[derive(Debug, Clone)]
pub struct GrpcCoordinator {
    client: TaskMakerManagerClient<Channel>,
}

impl GrpcCoordinator {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: TaskMakerManagerClient::new(channel),
        }
    }
}

#[async_trait]
impl CoordinatorClient for GrpcCoordinator {
    async fn evaluate_task(&self, request: EvaluateTaskRequest) -> Result<EventStream, Status> {
        let mut client = self.client.clone();
        let stream = client.evaluate_task(request).await?.into_inner();
        Ok(Box::pin(stream))
    }

    async fn stop(&self, evaluation: EvaluationId) -> Result<(), Status> {
        let mut client = self.client.clone();
        client
            .stop(StopRequest {
                evaluation_id: evaluation.0,
            })
            .await?;
        Ok(())
    }

    async fn clean_task(&self, store_dir: &str, temp_dir: &str) -> Result<(), Status> {
        let mut client = self.client.clone();
        client
            .clean_task(CleanTaskRequest {
                store_dir: store_dir.to_string(),
                temp_dir: temp_dir.to_string(),
            })
            .await?;
        Ok(())
    }
}
