//! Options builder: schema walk, group gating, dynamic values, pruning.

use indexmap::IndexMap;
use tracing::debug;

use super::resolve::{lookup, resolve};
use super::sanitize::{self, sanitize_bool};
use super::{OptionGroup, ResolvedOptions};
use crate::schema::{ANALYTICS, GENERAL, ParameterGroup, SOCIALBAR, Schema};
use crate::types::{EmbedType, OptionValue, RawOverrides, ServerContext, VideoRecord};
use crate::{EmbedError, Result};

/// Builds [`ResolvedOptions`] from a schema and a request context.
///
/// ```rust
/// # use wistia_embed::{OptionsBuilder, RawOverrides, Schema, ServerContext};
/// let overrides = RawOverrides::new().with("width", "800");
/// let options = OptionsBuilder::new(Schema::embedded())
///     .context(ServerContext::new("example.com"))
///     .build(&overrides, None)
///     .unwrap();
/// assert_eq!(options.int("general", "videoWidth"), Some(800));
/// ```
#[derive(Debug, Clone)]
pub struct OptionsBuilder<'a> {
    schema: &'a Schema,
    context: ServerContext,
}

impl<'a> OptionsBuilder<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            context: ServerContext::default(),
        }
    }

    /// Set the request context used for URL resolution and SSL forcing.
    pub fn context(mut self, context: ServerContext) -> Self {
        self.context = context;
        self
    }

    /// Resolve every option the overrides trigger.
    ///
    /// Never fails on bad user input: rejected values fall back to schema
    /// defaults and unknown keys are ignored. The only error is a missing
    /// video record when the analytics label needs the video's name.
    pub fn build(
        &self,
        overrides: &RawOverrides,
        video: Option<&VideoRecord>,
    ) -> Result<ResolvedOptions> {
        let embed_type = self.embed_type(overrides);
        let mut groups: IndexMap<String, OptionGroup> = IndexMap::new();

        for group in self.schema.groups() {
            if !self.is_included(group, overrides, embed_type) {
                continue;
            }

            let mut resolved = OptionGroup::new();
            for (name, spec) in group.options() {
                let key = lookup_key(group, name);
                let mut value = resolve(&key, overrides, spec, &self.context);

                if group.name() == ANALYTICS
                    && name == "label"
                    && value.as_ref().is_none_or(OptionValue::is_empty)
                {
                    let video = video.ok_or(EmbedError::MissingVideoField("name"))?;
                    value = Some(OptionValue::Str(video.name.clone()));
                }

                if let Some(value) = value.filter(|v| !v.is_empty()) {
                    resolved.insert(name.to_string(), value);
                }
            }

            if group.name() != GENERAL {
                if group.name() == SOCIALBAR && !has_trigger(group, &resolved) {
                    debug!("social bar requested without buttons, dropping group");
                    continue;
                }
                if resolved.is_empty() {
                    continue;
                }
            }
            groups.insert(group.name().to_string(), resolved);
        }

        if self.context.is_secure {
            groups
                .entry(GENERAL.to_string())
                .or_default()
                .insert("ssl".to_string(), OptionValue::Bool(true));
        }

        debug!(
            embed_type = %embed_type,
            groups = ?groups.keys().collect::<Vec<_>>(),
            "resolved embed options"
        );
        Ok(ResolvedOptions::from_groups(groups))
    }

    /// Peek at the general `type` option ahead of the group walk.
    ///
    /// Analytics gating depends on it regardless of where `general` sits in
    /// the schema. Rejections are not reported here; the group walk reports
    /// them when it resolves `type` for real.
    fn embed_type(&self, overrides: &RawOverrides) -> EmbedType {
        let Some(spec) = self.schema.spec(GENERAL, "type") else {
            return EmbedType::default();
        };
        lookup("type", overrides, &spec.aliases)
            .and_then(|(candidate, _)| sanitize::accept(&spec.kind, candidate, &self.context))
            .or_else(|| spec.default_value())
            .and_then(|value| value.as_str().and_then(|t| t.parse().ok()))
            .unwrap_or_default()
    }

    fn is_included(
        &self,
        group: &ParameterGroup,
        overrides: &RawOverrides,
        embed_type: EmbedType,
    ) -> bool {
        match group.name() {
            GENERAL => true,
            ANALYTICS => {
                let enabled = overrides
                    .get(ANALYTICS)
                    .is_some_and(|v| sanitize_bool(v, false));
                enabled && embed_type == EmbedType::Api
            }
            name => overrides.has_namespace(name),
        }
    }
}

/// Resolve options with the embedded schema.
pub fn build_options(
    overrides: &RawOverrides,
    video: Option<&VideoRecord>,
    context: &ServerContext,
) -> Result<ResolvedOptions> {
    OptionsBuilder::new(Schema::embedded())
        .context(context.clone())
        .build(overrides, video)
}

/// Override key for an option.
///
/// General options are bare; others are `group:option`, except the social
/// bar's button list, which is addressed by the bare group name.
fn lookup_key(group: &ParameterGroup, option: &str) -> String {
    match group.name() {
        GENERAL => option.to_string(),
        SOCIALBAR if group.trigger_option() == Some(option) => SOCIALBAR.to_string(),
        name => format!("{name}:{option}"),
    }
}

fn has_trigger(group: &ParameterGroup, resolved: &OptionGroup) -> bool {
    group
        .trigger_option()
        .is_some_and(|trigger| resolved.contains_key(trigger))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_keys_follow_namespacing() {
        let schema = Schema::embedded();
        let general = schema.group(GENERAL).unwrap();
        let socialbar = schema.group(SOCIALBAR).unwrap();
        let ga = schema.group(ANALYTICS).unwrap();

        assert_eq!(lookup_key(general, "videoWidth"), "videoWidth");
        assert_eq!(lookup_key(socialbar, "buttons"), "socialbar");
        assert_eq!(lookup_key(socialbar, "pageUrl"), "socialbar:pageUrl");
        assert_eq!(lookup_key(ga, "label"), "ga:label");
    }
}
