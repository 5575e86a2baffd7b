//! Built-in sensor schemas.
//!
//! One [`ExtractorSpec`] per supported Juniper sensor type. Adding a sensor
//! means adding a spec here and listing it in [`BUILTIN_SENSORS`].

use crate::schema::{
    ExtractorSpec, FieldSpec, GroupSpec, RepeatedSpec, Shape, TagFormat, TagRule, Walk,
};

// ============================================================================
// /junos/system/linecard/interface/
// ============================================================================

const QUEUE_INFO: RepeatedSpec = RepeatedSpec {
    label: None,
    tags: &[TagRule::required("queue_number", "egress_queue")],
    path_key: None,
    element: &GroupSpec::SCALARS,
};

const INTERFACE_BODY: GroupSpec = GroupSpec {
    label: None,
    fields: &[
        FieldSpec::repeated("egress_queue_info", &QUEUE_INFO),
        FieldSpec::repeated("ingress_queue_info", &QUEUE_INFO),
        FieldSpec::scalar("if_administration_status"),
        FieldSpec::scalar("if_operational_status"),
        FieldSpec::scalar("if_transitions"),
        FieldSpec::scalar("ifLastChange"),
        FieldSpec::scalar("ifHighSpeed"),
        FieldSpec::discard("if_description"),
    ],
    other: Shape::Group(&GroupSpec::SCALARS),
    walk: Walk::Document,
};

pub const INTERFACE: ExtractorSpec = ExtractorSpec {
    sensor: "jnpr_interface_ext",
    resource: "/junos/system/linecard/interface/",
    entries: "interface_stats",
    tags: &[
        TagRule::optional("if_name", "interface"),
        TagRule::optional("parent_ae_name", "interface_parent"),
    ],
    discard: &["init_time", "snmp_if_index"],
    body: &INTERFACE_BODY,
};

// ============================================================================
// /junos/services/segment-routing/sid/usage/
// ============================================================================

const SID_INGRESS_STATS: GroupSpec = GroupSpec {
    label: Some("lsp_stats"),
    ..GroupSpec::SCALARS
};

const SID_BODY: GroupSpec = GroupSpec {
    label: None,
    fields: &[FieldSpec::group("ingress_stats", &SID_INGRESS_STATS)],
    other: Shape::Discard,
    walk: Walk::Declared,
};

pub const SR_SID: ExtractorSpec = ExtractorSpec {
    sensor: "jnpr_sr_stats_per_sid_ext",
    resource: "/junos/services/segment-routing/sid/usage/",
    entries: "sid_stats",
    tags: &[
        TagRule::optional("sid_identifier", "lspname"),
        TagRule::optional("instance_identifier", "instance_identifier"),
        TagRule::optional("counter_name", "counter_name"),
    ],
    discard: &[],
    body: &SID_BODY,
};

// ============================================================================
// /junos/services/segment-routing/interface/{ingress,egress}/usage/
// ============================================================================

const SR_INTERFACE_STATS: GroupSpec = GroupSpec {
    label: None,
    fields: &[
        FieldSpec::scalar("packets").renamed("if_pkts"),
        FieldSpec::scalar("bytes").renamed("if_octets"),
    ],
    other: Shape::Scalar,
    walk: Walk::Document,
};

const SR_INGRESS_BODY: GroupSpec = GroupSpec {
    label: None,
    fields: &[FieldSpec::group("ingress_stats", &SR_INTERFACE_STATS)],
    other: Shape::Discard,
    walk: Walk::Declared,
};

const SR_EGRESS_BODY: GroupSpec = GroupSpec {
    label: None,
    fields: &[FieldSpec::group("egress_stats", &SR_INTERFACE_STATS)],
    other: Shape::Discard,
    walk: Walk::Declared,
};

pub const SR_INTERFACE_INGRESS: ExtractorSpec = ExtractorSpec {
    sensor: "jnpr_sr_stats_per_if_ingress_ext",
    resource: "/junos/services/segment-routing/interface/ingress/usage/",
    entries: "per_if_records",
    tags: &[
        TagRule::required("if_name", "interface").formatted(TagFormat::Prefixed("SR-IN-")),
        TagRule::optional("parent_ae_name", "interface_parent"),
    ],
    discard: &[],
    body: &SR_INGRESS_BODY,
};

pub const SR_INTERFACE_EGRESS: ExtractorSpec = ExtractorSpec {
    sensor: "jnpr_sr_stats_per_if_egress_ext",
    resource: "/junos/services/segment-routing/interface/egress/usage/",
    entries: "per_if_records",
    tags: &[
        TagRule::required("if_name", "interface").formatted(TagFormat::Prefixed("SR-OUT-")),
        TagRule::optional("parent_ae_name", "interface_parent"),
    ],
    discard: &[],
    body: &SR_EGRESS_BODY,
};

// ============================================================================
// /junos/services/label-switched-path/usage/
// ============================================================================

const LSP_BODY: GroupSpec = GroupSpec {
    label: Some("lsp_stats"),
    ..GroupSpec::SCALARS
};

pub const LSP: ExtractorSpec = ExtractorSpec {
    sensor: "jnpr_lsp_statistics_ext",
    resource: "/junos/services/label-switched-path/usage/",
    entries: "lsp_stats_records",
    tags: &[
        TagRule::optional("name", "lspname"),
        TagRule::optional("instance_identifier", "instance_identifier"),
        TagRule::optional("counter_name", "counter_name"),
    ],
    discard: &[],
    body: &LSP_BODY,
};

// ============================================================================
// /junos/system/linecard/interface/logical/usage
// ============================================================================

// Only packet and octet counters are reported per forwarding class.
const FC_COUNTERS: GroupSpec = GroupSpec {
    label: None,
    fields: &[FieldSpec::scalar("if_packets"), FieldSpec::scalar("if_octets")],
    other: Shape::Discard,
    walk: Walk::Declared,
};

const FC_STATS: RepeatedSpec = RepeatedSpec {
    label: None,
    tags: &[
        TagRule::optional("fc_number", "forwarding_class"),
        TagRule::optional("if_family", "family"),
    ],
    path_key: None,
    element: &FC_COUNTERS,
};

const LOGICAL_SECTION: GroupSpec = GroupSpec {
    label: None,
    fields: &[FieldSpec::repeated("if_fc_stats", &FC_STATS)],
    other: Shape::Scalar,
    walk: Walk::Document,
};

const LOGICAL_BODY: GroupSpec = GroupSpec {
    label: None,
    fields: &[],
    other: Shape::Group(&LOGICAL_SECTION),
    walk: Walk::Document,
};

pub const LOGICAL_INTERFACE: ExtractorSpec = ExtractorSpec {
    sensor: "jnprLogicalInterfaceExt",
    resource: "/junos/system/linecard/interface/logical/usage",
    entries: "interface_info",
    tags: &[
        TagRule::optional("if_name", "interface"),
        TagRule::optional("parent_ae_name", "interface_parent"),
    ],
    discard: &["init_time", "snmp_if_index", "op_state"],
    body: &LOGICAL_BODY,
};

// ============================================================================
// /junos/system/linecard/firewall/
// ============================================================================

const MEMORY_POOL: GroupSpec = GroupSpec {
    label: None,
    fields: &[FieldSpec::value("allocated")],
    other: Shape::Discard,
    walk: Walk::Declared,
};

const MEMORY_USAGE: RepeatedSpec = RepeatedSpec {
    label: None,
    tags: &[],
    path_key: Some("name"),
    element: &MEMORY_POOL,
};

const COUNTER_STATS: RepeatedSpec = RepeatedSpec {
    label: Some("filter_counter"),
    tags: &[TagRule::required("name", "filter_counter_name")],
    path_key: None,
    element: &GroupSpec::SCALARS,
};

const FIREWALL_BODY: GroupSpec = GroupSpec {
    label: None,
    fields: &[
        FieldSpec::repeated("memory_usage", &MEMORY_USAGE),
        FieldSpec::repeated("counter_stats", &COUNTER_STATS),
    ],
    other: Shape::Discard,
    walk: Walk::Declared,
};

pub const FIREWALL: ExtractorSpec = ExtractorSpec {
    sensor: "jnpr_firewall_ext",
    resource: "/junos/system/linecard/firewall/",
    entries: "firewall_stats",
    tags: &[
        TagRule::optional("filter_name", "filter_name"),
        TagRule::optional("timestamp", "filter_timestamp"),
    ],
    discard: &[],
    body: &FIREWALL_BODY,
};

// ============================================================================
// CPU / memory utilization
// ============================================================================

const CPU_MEMORY_BODY: GroupSpec = GroupSpec {
    label: Some("cpu_mem"),
    fields: &[FieldSpec::discard("application_utilization")],
    other: Shape::Scalar,
    walk: Walk::Document,
};

pub const CPU_MEMORY: ExtractorSpec = ExtractorSpec {
    sensor: "cpu_memory_util_ext",
    resource: "/junos/TBD/",
    entries: "utilization",
    tags: &[TagRule::optional("name", "name").formatted(TagFormat::CleanName)],
    discard: &[],
    body: &CPU_MEMORY_BODY,
};

/// All sensor types supported out of the box.
pub static BUILTIN_SENSORS: &[ExtractorSpec] = &[
    INTERFACE,
    SR_SID,
    SR_INTERFACE_INGRESS,
    SR_INTERFACE_EGRESS,
    LSP,
    LOGICAL_INTERFACE,
    FIREWALL,
    CPU_MEMORY,
];
