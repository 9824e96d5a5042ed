use super::ColumnType::{Boolean, Date, Decimal, Integer, Text};
use super::{EntitySchema, Field, Key, Messages, MissingRow};

pub static ALUNO: EntitySchema = EntitySchema {
    name: "Aluno",
    table: "aluno",
    path: "/alunos",
    key: Key::Surrogate("id_aluno"),
    fields: &[
        Field::required("nome_completo", Text),
        Field::required("data_nascimento", Date),
        Field::required("id_turma", Integer),
        Field::required("nome_responsavel", Text),
        Field::required("telefone_responsavel", Text),
        Field::required("email_responsavel", Text),
        Field::optional("informacoes_adicionais", Text),
    ],
    on_missing_delete: MissingRow::NotFound,
    messages: Messages {
        created: "Aluno criado com sucesso!",
        updated: "Aluno atualizado com sucesso!",
        deleted: "Aluno excluído com sucesso!",
        not_found: "Aluno não encontrado.",
        list_failed: "Erro ao listar alunos",
        create_failed: "Erro ao criar aluno",
        update_failed: "Erro ao atualizar aluno",
        delete_failed: "Erro ao excluir aluno",
    },
};

pub static TURMA: EntitySchema = EntitySchema {
    name: "Turma",
    table: "turma",
    path: "/turmas",
    key: Key::Surrogate("id_turma"),
    fields: &[
        Field::required("nome_turma", Text),
        Field::required("id_professor", Integer),
        Field::required("horario", Text),
    ],
    on_missing_delete: MissingRow::Ignore,
    messages: Messages {
        created: "Turma criada com sucesso!",
        updated: "Turma atualizada com sucesso!",
        deleted: "Turma excluída com sucesso!",
        not_found: "Turma não encontrada.",
        list_failed: "Erro ao listar turmas",
        create_failed: "Erro ao criar turma",
        update_failed: "Erro ao atualizar turma",
        delete_failed: "Erro ao excluir turma",
    },
};

pub static PROFESSOR: EntitySchema = EntitySchema {
    name: "Professor",
    table: "professor",
    path: "/professores",
    key: Key::Surrogate("id_professor"),
    fields: &[
        Field::required("nome_completo", Text),
        Field::required("email", Text),
        Field::required("telefone", Text),
    ],
    on_missing_delete: MissingRow::NotFound,
    messages: Messages {
        created: "Professor criado com sucesso!",
        updated: "Professor atualizado com sucesso!",
        deleted: "Professor excluído com sucesso!",
        not_found: "Professor não encontrado.",
        list_failed: "Erro ao listar professores",
        create_failed: "Erro ao criar professor",
        update_failed: "Erro ao atualizar professor",
        delete_failed: "Erro ao excluir professor",
    },
};

pub static PAGAMENTO: EntitySchema = EntitySchema {
    name: "Pagamento",
    table: "pagamento",
    path: "/pagamentos",
    key: Key::Surrogate("id_pagamento"),
    fields: &[
        Field::required("id_aluno", Integer),
        Field::required("data_pagamento", Date),
        Field::required("valor_pago", Decimal),
        Field::required("forma_pagamento", Text),
        Field::required("referencia", Text),
        Field::required("status", Text),
    ],
    on_missing_delete: MissingRow::Ignore,
    messages: Messages {
        created: "Pagamento registrado com sucesso!",
        updated: "Pagamento atualizado com sucesso!",
        deleted: "Pagamento excluído com sucesso!",
        not_found: "Pagamento não encontrado.",
        list_failed: "Erro ao listar pagamentos",
        create_failed: "Erro ao registrar pagamento",
        update_failed: "Erro ao atualizar pagamento",
        delete_failed: "Erro ao excluir pagamento",
    },
};

pub static PRESENCA: EntitySchema = EntitySchema {
    name: "Presenca",
    table: "presenca",
    path: "/presencas",
    key: Key::Surrogate("id_presenca"),
    fields: &[
        Field::required("id_aluno", Integer),
        Field::required("data_presenca", Date),
        Field::required("presente", Boolean),
    ],
    on_missing_delete: MissingRow::Ignore,
    messages: Messages {
        created: "Presença registrada com sucesso!",
        updated: "Presença atualizada com sucesso!",
        deleted: "Presença excluída com sucesso!",
        not_found: "Presença não encontrada.",
        list_failed: "Erro ao listar presenças",
        create_failed: "Erro ao registrar presença",
        update_failed: "Erro ao atualizar presença",
        delete_failed: "Erro ao excluir presença",
    },
};

pub static ATIVIDADE: EntitySchema = EntitySchema {
    name: "Atividade",
    table: "atividade",
    path: "/atividades",
    key: Key::Surrogate("id_atividade"),
    fields: &[
        Field::required("descricao", Text),
        Field::required("data_realizacao", Date),
    ],
    on_missing_delete: MissingRow::Ignore,
    messages: Messages {
        created: "Atividade criada com sucesso!",
        updated: "Atividade atualizada com sucesso!",
        deleted: "Atividade excluída com sucesso!",
        not_found: "Atividade não encontrada.",
        list_failed: "Erro ao listar atividades",
        create_failed: "Erro ao criar atividade",
        update_failed: "Erro ao atualizar atividade",
        delete_failed: "Erro ao excluir atividade",
    },
};

pub static ATIVIDADE_ALUNO: EntitySchema = EntitySchema {
    name: "Atividade_Aluno",
    table: "atividade_aluno",
    path: "/atividades_alunos",
    key: Key::Composite(&[
        Field::required("id_atividade", Integer),
        Field::required("id_aluno", Integer),
    ]),
    fields: &[],
    on_missing_delete: MissingRow::Ignore,
    messages: Messages {
        created: "Associação entre Atividade e Aluno criada com sucesso!",
        updated: "",
        deleted: "Associação entre Atividade e Aluno excluída com sucesso!",
        not_found: "Associação não encontrada.",
        list_failed: "Erro ao listar atividades e alunos",
        create_failed: "Erro ao criar associação",
        update_failed: "",
        delete_failed: "Erro ao excluir associação",
    },
};

pub static USUARIO: EntitySchema = EntitySchema {
    name: "Usuario",
    table: "usuario",
    path: "/usuarios",
    key: Key::Surrogate("id_usuario"),
    fields: &[
        Field::required("login", Text),
        Field::required("senha", Text).write_only(),
        Field::required("nivel_acesso", Text),
        Field::optional("id_professor", Integer),
    ],
    on_missing_delete: MissingRow::Ignore,
    messages: Messages {
        created: "Usuário criado com sucesso!",
        updated: "Usuário atualizado com sucesso!",
        deleted: "Usuário excluído com sucesso!",
        not_found: "Usuário não encontrado.",
        list_failed: "Erro ao listar usuários",
        create_failed: "Erro ao criar usuário",
        update_failed: "Erro ao atualizar usuário",
        delete_failed: "Erro ao excluir usuário",
    },
};

/// Every entity, in mount order.
pub static ALL: [&EntitySchema; 8] = [
    &ALUNO,
    &TURMA,
    &PROFESSOR,
    &PAGAMENTO,
    &PRESENCA,
    &ATIVIDADE,
    &ATIVIDADE_ALUNO,
    &USUARIO,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tables_and_paths_are_unique() {
        let tables: HashSet<_> = ALL.iter().map(|s| s.table).collect();
        let paths: HashSet<_> = ALL.iter().map(|s| s.path).collect();
        assert_eq!(tables.len(), ALL.len());
        assert_eq!(paths.len(), ALL.len());
    }

    #[test]
    fn only_aluno_and_professor_report_missing_deletes() {
        let strict: Vec<_> = ALL
            .iter()
            .filter(|s| s.on_missing_delete == MissingRow::NotFound)
            .map(|s| s.name)
            .collect();
        assert_eq!(strict, vec!["Aluno", "Professor"]);
    }

    #[test]
    fn only_the_link_entity_lacks_update() {
        let without_update: Vec<_> =
            ALL.iter().filter(|s| !s.supports_update()).map(|s| s.name).collect();
        assert_eq!(without_update, vec!["Atividade_Aluno"]);
    }

    #[test]
    fn optional_fields() {
        let optional: Vec<_> = ALL
            .iter()
            .flat_map(|s| s.fields.iter().map(move |f| (s.name, f)))
            .filter(|(_, f)| !f.required)
            .map(|(entity, f)| (entity, f.name))
            .collect();
        assert_eq!(
            optional,
            vec![("Aluno", "informacoes_adicionais"), ("Usuario", "id_professor")]
        );
    }
}
