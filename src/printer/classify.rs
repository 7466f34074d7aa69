//! Semantic classification of single values.
//!
//! [`value_class`] decides what kind of data a string holds so structured
//! printers (JSON, YAML, describe, logs) can color it. [`status_class`]
//! recognizes the lifecycle words kubectl prints in STATUS and REASON
//! columns.

use std::sync::OnceLock;

use regex::Regex;

use crate::color::Color;
use crate::theme::Theme;
use crate::utils::text::{is_only_digits, parse_human_duration};

/// What a raw value looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueClass {
    Null,
    True,
    False,
    Number,
    Quantity,
    Duration,
    String,
}

impl ValueClass {
    pub fn color<'t>(&self, theme: &'t Theme) -> &'t Color {
        match self {
            Self::Null => &theme.data.null,
            Self::True => &theme.data.r#true,
            Self::False => &theme.data.r#false,
            Self::Number => &theme.data.number,
            Self::Quantity => &theme.data.quantity,
            Self::Duration => &theme.data.duration,
            Self::String => &theme.data.string,
        }
    }
}

/// Kubernetes resource quantities, e.g. `100m`, `5Gi`, `1.5k`.
fn quantity_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(\d+|\.\d+|\d+\.|\d+\.\d+)?(m|[kMGTPE]i?)$").expect("valid regex")
    })
}

pub fn value_class(value: &str) -> ValueClass {
    match value {
        "null" | "<none>" | "<unknown>" | "<unset>" | "<nil>" | "<invalid>" => {
            return ValueClass::Null
        }
        "true" | "True" => return ValueClass::True,
        "false" | "False" => return ValueClass::False,
        _ => {}
    }

    if is_only_digits(value) {
        return ValueClass::Number;
    }
    if let Some((left, right)) = value.split_once('.') {
        if is_only_digits(left) && is_only_digits(right) {
            return ValueClass::Number;
        }
    }
    if quantity_pattern().is_match(value) {
        return ValueClass::Quantity;
    }
    if parse_human_duration(value).is_some() {
        return ValueClass::Duration;
    }
    ValueClass::String
}

/// Color for a raw value.
pub fn value_color<'t>(value: &str, theme: &'t Theme) -> &'t Color {
    value_class(value).color(theme)
}

/// Outcome of a known status word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Warning,
    Error,
}

impl StatusClass {
    pub fn color<'t>(&self, theme: &'t Theme) -> &'t Color {
        match self {
            Self::Success => &theme.status.success,
            Self::Warning => &theme.status.warning,
            Self::Error => &theme.status.error,
        }
    }
}

/// Classifies one status word. An `Init:` prefix is ignored.
pub fn status_class(status: &str) -> Option<StatusClass> {
    let status = status.strip_prefix("Init:").unwrap_or(status);
    let class = match status {
        // kubelet container, pod, image and node events
        "Failed"
        | "BackOff"
        | "ExceededGracePeriod"
        | "FailedKillPod"
        | "FailedCreatePodContainer"
        | "NetworkNotReady"
        | "InspectFailed"
        | "ErrImageNeverPull"
        | "NodeNotSchedulable"
        | "KubeletSetupFailed"
        | "FailedAttachVolume"
        | "FailedMount"
        | "VolumeResizeFailed"
        | "FileSystemResizeFailed"
        | "FailedMapVolume"
        | "ContainerGCFailed"
        | "ImageGCFailed"
        | "FailedNodeAllocatableEnforcement"
        | "FailedCreate"
        | "FailedCreatePodSandBox"
        | "FailedPodSandBoxStatus"
        | "FailedMountOnFilesystemMismatch"
        | "InvalidDiskCapacity"
        | "FreeDiskSpaceFailed"
        | "Unhealthy"
        | "FailedSync"
        | "FailedValidation"
        | "PreCreateHookError"
        | "PreStartHookError"
        | "PostStartHookError"
        | "FailedPostStartHook"
        | "FailedPreStopHook"
        | "NotReady"
        | "NetworkUnavailable"
        // container states
        | "ContainerStatusUnknown"
        | "CreateContainerConfigError"
        | "CreateContainerError"
        | "ContainerCannotRun"
        | "CrashLoopBackOff"
        | "DeadlineExceeded"
        | "ImagePullBackOff"
        | "Evicted"
        | "FailedScheduling"
        | "Error"
        | "ErrImagePull"
        | "OOMKilled"
        | "RunContainerError"
        | "StartError"
        // PVC
        | "Lost" => StatusClass::Error,

        "Killing"
        | "Preempting"
        | "Pulling"
        | "NodeNotReady"
        | "NodeSchedulable"
        | "Starting"
        | "AlreadyMountedVolume"
        | "SuccessfulAttachVolume"
        | "SuccessfulMountVolume"
        | "NodeAllocatableEnforced"
        | "SchedulingDisabled"
        | "ProbeWarning"
        | "Pending"
        | "ContainerCreating"
        | "PodInitializing"
        | "Terminating"
        | "Terminated"
        | "Warning"
        // PV reclaim policy
        | "Delete"
        // PVC
        | "Available"
        | "Released"
        | "ScalingReplicaSet" => StatusClass::Warning,

        "Running"
        | "Completed"
        | "Pulled"
        | "Created"
        | "Rebooted"
        | "NodeReady"
        | "Started"
        | "Normal"
        | "VolumeResizeSuccessful"
        | "FileSystemResizeSuccessful"
        | "Ready"
        | "Scheduled"
        | "SuccessfulCreate"
        // PV reclaim policy
        | "Retain"
        // PVC
        | "Bound" => StatusClass::Success,

        _ => return None,
    };
    Some(class)
}

/// Renders a status cell, coloring each part of a comma separated list
/// (`Ready,SchedulingDisabled`) on its own. `None` when nothing matched.
pub fn render_status(status: &str, theme: &Theme) -> Option<String> {
    if !status.contains(',') {
        return status_class(status).map(|class| class.color(theme).render(status));
    }

    let mut any = false;
    let parts: Vec<String> = status
        .split(',')
        .map(|part| match status_class(part) {
            Some(class) => {
                any = true;
                class.color(theme).render(part)
            }
            None => part.to_string(),
        })
        .collect();
    any.then(|| parts.join(","))
}
