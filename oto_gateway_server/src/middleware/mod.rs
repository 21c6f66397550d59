mod request_context;

pub use request_context::{
    client_address,
    is_valid_trace_id,
    new_trace_id,
    RequestContextFactory,
    RequestContextService,
    TraceId,
    PROCESS_TIME_HEADER,
    TRACE_ID_HEADER,
};
