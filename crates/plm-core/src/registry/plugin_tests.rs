    use super::*;
    use crate::test_support::{mock_resolver, MockList, FAILING_PROVIDER, LIST, PROVIDER};
    use std::sync::atomic::Ordering;

    #[test]
    fn test_resolver_new() {
        let resolver = PluginResolver::new();
        assert!(resolver.list_types().is_empty());
        assert!(resolver.provider_types().is_empty());
    }

    #[test]
    fn test_register_list_type_duplicate() {
        let resolver = PluginResolver::default();
        resolver
            .register_list_type("queue", || Ok(Box::new(MockList::default()) as Box<dyn PersistentList>))
            .unwrap();

        let result = resolver
            .register_list_type("queue", || Ok(Box::new(MockList::default()) as Box<dyn PersistentList>));
        assert!(matches!(result, Err(PluginError::AlreadyRegistered(name)) if name == "queue"));
    }

    #[test]
    fn test_has_types() {
        let (resolver, _) = mock_resolver();
        assert!(resolver.has_list_type(LIST));
        assert!(resolver.has_provider_type(PROVIDER));
        assert!(!resolver.has_list_type(PROVIDER));
        assert!(!resolver.has_provider_type("missing"));
    }

    #[test]
    fn test_resolve_unknown_list_type() {
        let (resolver, _) = mock_resolver();
        let result = resolver.resolve_list("org.example.MissingQueue");
        assert!(matches!(result, Err(PluginError::UnknownType(name)) if name == "org.example.MissingQueue"));
    }

    #[test]
    fn test_resolve_list_is_not_initialized() {
        let (resolver, counters) = mock_resolver();
        let list = resolver.resolve_list(LIST).unwrap();

        assert_eq!(list.key(), "");
        assert!(list.provider().is_none());
        assert_eq!(counters.lists.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_resolve_provider_runs_initialize_once() {
        let (resolver, counters) = mock_resolver();

        resolver.resolve_provider(PROVIDER).unwrap();
        assert_eq!(counters.providers.load(Ordering::SeqCst), 1);

        resolver.resolve_provider(PROVIDER).unwrap();
        assert_eq!(counters.providers.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_resolve_provider_initialize_failure() {
        let (resolver, _) = mock_resolver();
        let err = resolver.resolve_provider(FAILING_PROVIDER).err().unwrap();

        assert!(matches!(err, PluginError::InitializationFailed { .. }));
        assert_eq!(err.type_name(), FAILING_PROVIDER);
    }

    #[test]
    fn test_factory_construction_error_propagates() {
        let resolver = PluginResolver::new();
        resolver
            .register_list_type("broken", || {
                Err(PluginError::ConstructionFailed {
                    type_name: "broken".to_string(),
                    message: "missing table".to_string(),
                })
            })
            .unwrap();

        let result = resolver.resolve_list("broken");
        assert!(matches!(result, Err(PluginError::ConstructionFailed { .. })));
    }

    #[test]
    fn test_unregister_types() {
        let (resolver, _) = mock_resolver();
        resolver.unregister_list_type(LIST).unwrap();
        resolver.unregister_provider_type(PROVIDER).unwrap();

        assert!(!resolver.has_list_type(LIST));
        assert!(!resolver.has_provider_type(PROVIDER));
        assert!(resolver.unregister_list_type(LIST).is_err());
    }

    #[test]
    fn test_initialize_if_supported_without_capability() {
        assert!(!initialize_if_supported(None).unwrap());
    }
