use prgate_config::Config;
use prgate_git_interface::GitService;
use prgate_process_interface::ProcessService;

use crate::CoreModule;

pub struct CoreContext<'a> {
    pub config: &'a Config,
    pub core_module: &'a CoreModule,
    pub git_service: &'a (dyn GitService + 'a),
    pub process_service: &'a (dyn ProcessService + 'a),
}

#[cfg(test)]
pub(crate) mod tests {
    use prgate_config::Config;
    use prgate_git_interface::MockGitService;
    use prgate_process_interface::MockProcessService;
    use tempfile::TempDir;

    use crate::{CoreContext, CoreModule};

    #[allow(dead_code)]
    pub struct CoreContextTest {
        pub config: Config,
        pub core_module: CoreModule,
        pub git_service: MockGitService,
        pub process_service: MockProcessService,
        pub temp_root: TempDir,
    }

    impl CoreContextTest {
        #[allow(dead_code)]
        pub fn new() -> Self {
            let temp_root = tempfile::tempdir().unwrap();
            let mut config = Config::from_env_no_version().unwrap();
            config.workspace.temp_root = temp_root.path().to_path_buf();
            config.workspace.prefix = "test".into();
            config.workspace.namespace_local_branch = false;
            config.verify.executable = "/usr/local/bin/verifier".into();
            config.verify.command = "enforce".into();
            config.verify.reporter = "github".into();
            config.verify.token = "secret-token".into();
            config.pipeline.timeout_seconds = 0;
            config.pipeline.actions = vec![];

            Self {
                config,
                core_module: CoreModule::builder().build(),
                git_service: MockGitService::new(),
                process_service: MockProcessService::new(),
                temp_root,
            }
        }

        #[allow(dead_code)]
        pub fn as_context(&self) -> CoreContext {
            CoreContext {
                config: &self.config,
                core_module: &self.core_module,
                git_service: &self.git_service,
                process_service: &self.process_service,
            }
        }

        /// Number of entries left under the workspace root.
        #[allow(dead_code)]
        pub fn workspace_count(&self) -> usize {
            std::fs::read_dir(self.temp_root.path()).unwrap().count()
        }
    }
}
