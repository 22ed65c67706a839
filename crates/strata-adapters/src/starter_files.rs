//! The built-in starter-file set.
//!
//! Each entry pairs a path template with a content template; both are
//! rendered against the validated configuration at materialization time.
//! The set is fixed: adding a starter file means adding one entry here.

use strata_core::domain::StarterFile;
use strata_core::error::StrataResult;

const GITIGNORE: &str = r#"## .NET build artifacts
bin/
obj/
*.user

## IDE
.vs/
.vscode/
.idea/

## Local settings
appsettings.Development.local.json
*.db
"#;

const PROJECT_GUIDE: &str = r#"# {{PROJECT_NAME}}

A layered .NET solution targeting {{FRAMEWORK}}, using {{DB_PROVIDER}} for persistence.

## Layout

- `src/Core/{{PROJECT_NAME}}.Domain` - entities and domain rules; no external dependencies
- `src/Core/{{PROJECT_NAME}}.Application` - use cases, validation, mapping
- `src/Infrastructure/{{PROJECT_NAME}}.Infrastructure` - EF Core persistence
- `src/Presentation/{{PROJECT_NAME}}.WebApi` - HTTP host
{{#if tests}}
- `tests/` - xUnit test projects for Domain, Application, and WebApi
{{/if}}
{{#if cqrs}}
## CQRS

The Application layer is organized around MediatR: put write operations under
`Commands/`, read operations under `Queries/`, and their `IRequestHandler`
implementations under `Handlers/`.
{{/if}}
## Getting started

```sh
dotnet build
dotnet run --project src/Presentation/{{PROJECT_NAME}}.WebApi
```

The connection string in `appsettings.json` points at a local {{DB_PROVIDER}}
instance; adjust it before first run.
"#;

const APPSETTINGS: &str = r#"{
  "ConnectionStrings": {
    "DefaultConnection": "{{CONNECTION_STRING}}"
  },
  "Logging": {
    "LogLevel": {
      "Default": "Information",
      "Microsoft.AspNetCore": "Warning"
    }
  },
  "AllowedHosts": "*"
}
"#;

const BASE_ENTITY: &str = r#"namespace {{PROJECT_NAME}}.Domain.Entities;

public abstract class BaseEntity
{
    public Guid Id { get; set; } = Guid.NewGuid();

    public DateTime CreatedAt { get; set; } = DateTime.UtcNow;

    public DateTime? UpdatedAt { get; set; }
}
"#;

const DEPENDENCY_INJECTION: &str = r#"using Microsoft.Extensions.DependencyInjection;

namespace {{PROJECT_NAME}}.Application;

public static class DependencyInjection
{
    public static IServiceCollection AddApplication(this IServiceCollection services)
    {
{{#if cqrs}}
        services.AddMediatR(cfg =>
            cfg.RegisterServicesFromAssembly(typeof(DependencyInjection).Assembly));
{{/if}}
        services.AddAutoMapper(typeof(DependencyInjection).Assembly);
        return services;
    }
}
"#;

/// The fixed starter-file set, in write order.
pub fn builtin_set() -> StrataResult<Vec<StarterFile>> {
    Ok(vec![
        StarterFile::new("gitignore", ".gitignore", GITIGNORE)?,
        StarterFile::new("project guide", "PROJECT_GUIDE.md", PROJECT_GUIDE)?,
        // `dotnet new webapi` already generates an appsettings.json; ours
        // carries the provider-specific connection string and must win.
        StarterFile::replacing(
            "appsettings",
            "src/Presentation/{{PROJECT_NAME}}.WebApi/appsettings.json",
            APPSETTINGS,
        )?,
        StarterFile::new(
            "base entity",
            "src/Core/{{PROJECT_NAME}}.Domain/Entities/BaseEntity.cs",
            BASE_ENTITY,
        )?,
        StarterFile::new(
            "application DI",
            "src/Core/{{PROJECT_NAME}}.Application/DependencyInjection.cs",
            DEPENDENCY_INJECTION,
        )?,
    ])
}
