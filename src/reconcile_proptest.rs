//! Property-based tests for reconciliation.
//!
//! These tests use proptest to generate provisioning output and cluster
//! specifications, and check that the merge rules hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;
    use serde_json::{json, Value as JsonValue};

    use crate::cluster::{Cluster, WorkerConfig};
    use crate::flags::{set_flag, EncodedDocument, FlagValue};
    use crate::terraform::{build_hosts, ControlPlane, Output};

    fn address() -> impl Strategy<Value = String> {
        (1u8..=254, 0u8..=255, 0u8..=255).prop_map(|(a, b, c)| format!("10.{}.{}.{}", a, b, c))
    }

    fn pool_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,10}"
    }

    fn vsphere_doc() -> impl Strategy<Value = JsonValue> {
        (
            proptest::option::of("[a-z]{1,8}"),
            0i64..16,
            proptest::option::of(1u32..10),
            proptest::option::of("[a-z]{1,8}"),
            any::<bool>(),
        )
            .prop_map(|(cluster, cpus, replicas, os, insecure)| {
                json!({
                    "cluster": cluster,
                    "cpus": cpus,
                    "replicas": replicas,
                    "operatingSystem": os,
                    "allowInsecure": insecure,
                })
            })
    }

    fn output(control_plane: JsonValue, workers: BTreeMap<String, Vec<JsonValue>>) -> Output {
        let doc = json!({
            "kubeone_api": {"value": {"endpoint": "lb.example.com"}},
            "kubeone_hosts": {"value": {"control_plane": control_plane}},
            "kubeone_workers": {"value": workers},
        });
        Output::from_json(doc.to_string().as_bytes()).unwrap()
    }

    fn base_cluster(existing: &[(String, Option<u32>, Option<String>)]) -> Cluster {
        let mut cluster = Cluster::default();
        cluster.cloud_provider.name = "vsphere".to_string();
        for (name, replicas, preset) in existing {
            let mut pool = WorkerConfig::new(name.clone());
            pool.replicas = *replicas;
            pool.config.cloud_provider_spec = preset
                .as_ref()
                .map(|c| EncodedDocument::from_json(&json!({ "cluster": c }).to_string()).unwrap());
            cluster.workers.push(pool);
        }
        cluster
    }

    proptest! {
        /// Property: an existing key keeps its value whatever is written over it
        #[test]
        fn set_flag_never_overwrites(
            key in "[a-zA-Z]{1,12}",
            existing in "[a-z0-9]{0,12}",
            new_value in "[a-z0-9]{1,12}",
        ) {
            let mut target = Some(
                EncodedDocument::from_json(&json!({ key.as_str(): existing.clone() }).to_string()).unwrap(),
            );
            let inserted = set_flag(&mut target, &key, &FlagValue::Str(new_value)).unwrap();
            prop_assert!(!inserted);
            prop_assert_eq!(
                target.unwrap().flag(&key).unwrap(),
                Some(FlagValue::Str(existing))
            );
        }

        /// Property: a missing private address falls back to the public one
        #[test]
        fn private_address_falls_back(
            public in proptest::collection::vec(address(), 1..8),
            private_len in 0usize..8,
        ) {
            let private: Vec<String> = public.iter().take(private_len).map(|p| format!("{}-private", p)).collect();
            let cp = ControlPlane {
                public_address: public.clone(),
                private_address: private.clone(),
                ssh_port: "22".to_string(),
                ..Default::default()
            };

            let hosts = build_hosts(&cp).unwrap();
            prop_assert_eq!(hosts.len(), public.len());
            for (i, host) in hosts.iter().enumerate() {
                prop_assert_eq!(host.id, i);
                let expected = private.get(i).unwrap_or(&public[i]);
                prop_assert_eq!(&host.private_address, expected);
            }
        }

        /// Property: reconciling twice gives the same cluster as reconciling once
        #[test]
        fn reconcile_is_idempotent(
            docs in proptest::collection::btree_map(pool_name(), vsphere_doc(), 0..5),
            existing in proptest::collection::vec(
                (pool_name(), proptest::option::of(1u32..10), proptest::option::of("[a-z]{1,8}")),
                0..3,
            ),
        ) {
            let workers = docs.into_iter().map(|(k, v)| (k, vec![v])).collect();
            let out = output(json!({"public_address": ["1.1.1.1"], "ssh_port": "22"}), workers);

            let mut once = base_cluster(&existing);
            out.apply(&mut once).unwrap();

            let mut twice = once.clone();
            out.apply(&mut twice).unwrap();

            prop_assert_eq!(once, twice);
        }

        /// Property: pre-set replicas and provider settings survive reconciliation
        #[test]
        fn user_values_take_precedence(
            name in pool_name(),
            replicas in 1u32..10,
            preset in "[a-z]{1,8}",
            doc in vsphere_doc(),
        ) {
            let mut cluster = base_cluster(&[(name.clone(), Some(replicas), Some(preset.clone()))]);
            let out = output(
                json!({"public_address": ["1.1.1.1"]}),
                [(name.clone(), vec![doc.clone()])].into_iter().collect(),
            );
            out.apply(&mut cluster).unwrap();

            let pool = cluster.worker(&name).unwrap();
            prop_assert_eq!(pool.replicas, Some(replicas));
            let settings = pool.config.cloud_provider_spec.as_ref().unwrap();
            prop_assert_eq!(settings.flag("cluster").unwrap(), Some(FlagValue::Str(preset)));
            if let Some(os) = doc["operatingSystem"].as_str() {
                prop_assert_eq!(pool.config.operating_system.as_deref(), Some(os));
            }
        }

        /// Property: every pool name ends up exactly once in the cluster
        #[test]
        fn pools_are_never_duplicated(
            names in proptest::collection::btree_set(pool_name(), 1..6),
            rounds in 1usize..4,
        ) {
            let workers: BTreeMap<String, Vec<JsonValue>> =
                names.iter().map(|n| (n.clone(), vec![json!({"cpus": 1})])).collect();
            let out = output(json!({"public_address": ["1.1.1.1"]}), workers);

            let mut cluster = base_cluster(&[]);
            for _ in 0..rounds {
                out.apply(&mut cluster).unwrap();
            }

            prop_assert_eq!(cluster.workers.len(), names.len());
            for name in &names {
                prop_assert_eq!(cluster.workers.iter().filter(|w| &w.name == name).count(), 1);
            }
        }
    }
}
