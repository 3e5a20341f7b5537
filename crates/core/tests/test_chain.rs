//! Integration tests for chain functionality.

#[cfg(test)]
mod integration_tests {
    use tapenet_chain::{chain, ChainArgs, ChainArgsBuilder, ChainResult, Error};

    const LINEAR: &str = "3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0";
    const FEEDBACK: &str =
        "3,26,1001,26,-4,26,3,27,1002,27,2,27,1,27,26,27,4,27,1001,28,-1,28,1005,28,6,99,0,0,5";

    #[tokio::test]
    async fn test_chain_with_fixed_phases() {
        tapenet_tracing::init_test_tracing();

        let args = ChainArgsBuilder::new()
            .target(LINEAR.to_string())
            .phases("4,3,2,1,0".to_string())
            .build()
            .expect("failed to build args");

        let result = chain(args).await.expect("failed to run chain");
        assert_eq!(result, ChainResult { phases: vec![4, 3, 2, 1, 0], signal: 43210 });
    }

    #[tokio::test]
    async fn test_chain_feedback_search() {
        let args = ChainArgs {
            target: FEEDBACK.to_string(),
            phases: "5,6,7,8,9".to_string(),
            seed: 0,
            feedback: true,
            search: true,
        };

        let result = chain(args).await.expect("failed to run chain");
        assert_eq!(result.phases, vec![9, 8, 7, 6, 5]);
        assert_eq!(result.signal, 139629729);
    }

    #[tokio::test]
    async fn test_chain_seed() {
        // OUT (phase + input)
        let args = ChainArgsBuilder::new()
            .target("3,20,3,21,1,20,21,20,4,20,99".to_string())
            .phases("1,1".to_string())
            .seed(40)
            .build()
            .expect("failed to build args");

        assert_eq!(chain(args).await.expect("failed to run chain").signal, 42);
    }

    #[tokio::test]
    async fn test_chain_invalid_phases() {
        let args = ChainArgsBuilder::new()
            .target(LINEAR.to_string())
            .phases("4,three".to_string())
            .build()
            .expect("failed to build args");

        assert!(matches!(chain(args).await, Err(Error::InvalidPhases(_))));
    }

    #[tokio::test]
    async fn test_chain_invalid_target() {
        let args = ChainArgsBuilder::new()
            .target("./does/not/exist.txt".to_string())
            .build()
            .expect("failed to build args");

        assert!(chain(args).await.is_err());
    }
}
