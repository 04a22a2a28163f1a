use std::sync::Arc;

use crate::{ClClientContext, ClClientType, ElClientContext, ElClientType};

/// Client implementations to launch for a single future participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ParticipantSpec {
    /// EL client implementation.
    pub el_client_type: ElClientType,
    /// CL client implementation.
    pub cl_client_type: ClClientType,
}

/// A launched participant: an EL client paired with the CL client driving it.
///
/// Cloning is cheap, the clones share the client contexts.
#[derive(Debug, Clone)]
pub struct Participant {
    el_client_type: ElClientType,
    cl_client_type: ClClientType,
    el_client_context: Arc<ElClientContext>,
    cl_client_context: Arc<ClClientContext>,
}

impl Participant {
    pub(crate) fn new(
        el_client_type: ElClientType,
        cl_client_type: ClClientType,
        el_client_context: Arc<ElClientContext>,
        cl_client_context: Arc<ClClientContext>,
    ) -> Self {
        Self {
            el_client_type,
            cl_client_type,
            el_client_context,
            cl_client_context,
        }
    }

    /// EL client implementation of this participant.
    pub fn el_client_type(&self) -> ElClientType {
        self.el_client_type
    }

    /// CL client implementation of this participant.
    pub fn cl_client_type(&self) -> ClClientType {
        self.cl_client_type
    }

    /// Client types this participant was launched with.
    pub fn spec(&self) -> ParticipantSpec {
        ParticipantSpec {
            el_client_type: self.el_client_type,
            cl_client_type: self.cl_client_type,
        }
    }

    /// Context of the running EL client.
    pub fn el_client_context(&self) -> &Arc<ElClientContext> {
        &self.el_client_context
    }

    /// Context of the running CL client.
    pub fn cl_client_context(&self) -> &Arc<ClClientContext> {
        &self.cl_client_context
    }
}
